use serde::{Deserialize, Serialize};

use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
        }
    }
}

impl Movie {
    /// IMDb search link for this title.
    #[must_use]
    pub fn imdb_search_url(&self) -> String {
        format!(
            "https://www.imdb.com/find?q={}",
            urlencoding::encode(&self.title)
        )
    }
}

/// Validated title/year pair ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieInput {
    pub title: String,
    pub year: String,
}

impl MovieInput {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }
}

/// Sample rows written by the `forge` command.
pub const SAMPLE_MOVIES: [(&str, &str); 10] = [
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
    ("The Pork of Music", "2012"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imdb_search_url_is_encoded() {
        let movie = Movie {
            id: 1,
            title: "WALL-E & Eve".to_string(),
            year: "2008".to_string(),
        };
        assert_eq!(
            movie.imdb_search_url(),
            "https://www.imdb.com/find?q=WALL-E%20%26%20Eve"
        );
    }
}
