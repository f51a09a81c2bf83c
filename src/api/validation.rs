use thiserror::Error;

use crate::models::movie::MovieInput;

pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_YEAR_CHARS: usize = 4;
pub const MAX_NAME_CHARS: usize = 20;

/// Rejected form input. Handlers turn this into a flash and a redirect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be {max} characters or less")]
    TooLong { field: &'static str, max: usize },
}

fn required(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Year is checked for length only; "199x" is accepted.
pub fn validate_movie(title: &str, year: &str) -> Result<MovieInput, ValidationError> {
    let title = required("Title", title, MAX_TITLE_CHARS)?;
    let year = required("Year", year, MAX_YEAR_CHARS)?;
    Ok(MovieInput { title, year })
}

pub fn validate_display_name(name: &str) -> Result<String, ValidationError> {
    required("Name", name, MAX_NAME_CHARS)
}

pub fn validate_credentials<'a>(
    username: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Empty { field: "Username" });
    }
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "Password" });
    }
    Ok((username, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie() {
        assert_eq!(
            validate_movie("Leon", "1994"),
            Ok(MovieInput::new("Leon", "1994"))
        );
        assert_eq!(
            validate_movie("  WALL-E ", " 2008"),
            Ok(MovieInput::new("WALL-E", "2008"))
        );
        assert!(validate_movie("Mahjong", "199x").is_ok());

        assert_eq!(
            validate_movie("", "1994"),
            Err(ValidationError::Empty { field: "Title" })
        );
        assert_eq!(
            validate_movie("Leon", "   "),
            Err(ValidationError::Empty { field: "Year" })
        );
        assert_eq!(
            validate_movie("Leon", "99999"),
            Err(ValidationError::TooLong {
                field: "Year",
                max: MAX_YEAR_CHARS
            })
        );
        assert!(validate_movie(&"a".repeat(60), "1994").is_ok());
        assert!(validate_movie(&"a".repeat(61), "1994").is_err());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        assert!(validate_movie(&"é".repeat(60), "1994").is_ok());
        assert!(validate_display_name(&"名".repeat(20)).is_ok());
        assert!(validate_display_name(&"名".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert_eq!(validate_display_name("Grey Li"), Ok("Grey Li".to_string()));
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert_eq!(validate_credentials(" admin ", "pw"), Ok(("admin", "pw")));
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("admin", "").is_err());
    }
}
