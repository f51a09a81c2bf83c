//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::user::Account;
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;
use tokio::task;

/// Display name given to a freshly created admin account.
const DEFAULT_ADMIN_NAME: &str = "Admin";

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let Some(account) = self.store.get_user_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        // Argon2 verification is CPU-bound; keep it off the async workers.
        let password = password.to_string();
        let (account, is_valid) = task::spawn_blocking(move || {
            let is_valid = account.validate_password(&password);
            (account, is_valid)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task panicked: {e}")))?;

        if is_valid {
            Ok(account)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn get_account(&self, id: i32) -> Result<Option<Account>, AuthError> {
        Ok(self.store.get_user(id).await?)
    }

    async fn rename(&self, id: i32, name: &str) -> Result<(), AuthError> {
        if self.store.update_user_name(id, name).await? {
            Ok(())
        } else {
            Err(AuthError::NotFound(id))
        }
    }

    async fn upsert_admin(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let mut account = match self.store.first_user().await? {
            Some(mut existing) => {
                existing.username = username.to_string();
                existing
            }
            None => Account::new(username, DEFAULT_ADMIN_NAME),
        };

        let password = password.to_string();
        let security = self.security.clone();
        account = task::spawn_blocking(move || {
            account.set_password(&password, &security)?;
            Ok::<Account, anyhow::Error>(account)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task panicked: {e}")))??;

        let saved = self.store.save_user(&account).await?;
        tracing::info!(username = %saved.username, id = saved.id, "Admin account saved");
        Ok(saved)
    }
}
