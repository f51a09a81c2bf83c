//! The admin account and its credential handling.
//!
//! Passwords are stored as Argon2id hashes in PHC string format. Hashing only
//! touches the in-memory [`Account`]; callers persist through the store.

use anyhow::Result;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::SecurityConfig;
use crate::entities::users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub username: String,
    password_hash: Option<String>,
}

impl From<users::Model> for Account {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            password_hash: model.password_hash,
        }
    }
}

impl Account {
    /// An account that has not been written yet (`id` is 0 until inserted).
    #[must_use]
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            username: username.into(),
            password_hash: None,
        }
    }

    #[must_use]
    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    /// Hashes `plaintext` with a fresh salt, replacing any previous hash.
    ///
    /// # Errors
    ///
    /// Fails only if the configured Argon2 parameters are invalid.
    pub fn set_password(&mut self, plaintext: &str, config: &SecurityConfig) -> Result<()> {
        self.password_hash = Some(hash_password(plaintext, config)?);
        Ok(())
    }

    /// Checks `plaintext` against the stored hash. An account without a
    /// hash, or with an unparsable one, never matches.
    #[must_use]
    pub fn validate_password(&self, plaintext: &str) -> bool {
        let Some(stored) = self.password_hash.as_deref() else {
            return false;
        };

        let Ok(parsed_hash) = PasswordHash::new(stored) else {
            tracing::warn!(username = %self.username, "Stored password hash is malformed");
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
