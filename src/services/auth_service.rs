//! Domain service for the admin account: login checks, display name
//! updates and the out-of-band admin bootstrap.

use thiserror::Error;

use crate::models::user::Account;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately the same case.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the matching account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the username is unknown
    /// or the password does not match.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError>;

    /// Looks up the account a session points at.
    async fn get_account(&self, id: i32) -> Result<Option<Account>, AuthError>;

    /// Changes an account's display name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`] if the account no longer exists.
    async fn rename(&self, id: i32, name: &str) -> Result<(), AuthError>;

    /// Creates the admin account, or rewrites the username and password of
    /// the existing one.
    async fn upsert_admin(&self, username: &str, password: &str) -> Result<Account, AuthError>;
}
