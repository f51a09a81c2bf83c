//! One-shot notices carried in the session until the next rendered page.

use tower_sessions::Session;

const FLASH_KEY: &str = "_flashes";

pub const INVALID_INPUT: &str = "Invalid input.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const LOGIN_SUCCESS: &str = "Login success.";
pub const LOGGED_OUT: &str = "Goodbye.";
pub const ITEM_CREATED: &str = "Item created.";
pub const ITEM_UPDATED: &str = "Item updated.";
pub const ITEM_DELETED: &str = "Item deleted.";
pub const SETTINGS_UPDATED: &str = "Settings updated.";

/// Queue a message for the next page render.
pub async fn push(session: &Session, message: &str) -> Result<(), tower_sessions::session::Error> {
    let mut pending = session
        .get::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default();
    pending.push(message.to_string());
    session.insert(FLASH_KEY, pending).await
}

/// Drain every pending message.
pub async fn take(session: &Session) -> Result<Vec<String>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}
