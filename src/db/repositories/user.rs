use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::users;
use crate::models::user::Account;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get account by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Account>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(Account::from))
    }

    /// Get account by login username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(Account::from))
    }

    /// The lowest-id account. Only the admin commands use this; request
    /// handlers always resolve the account from the session.
    pub async fn first(&self) -> Result<Option<Account>> {
        let user = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query first user")?;

        Ok(user.map(Account::from))
    }

    /// Inserts a new row when `account.id` is 0, otherwise overwrites the
    /// existing row. Returns the stored account.
    pub async fn save(&self, account: &Account) -> Result<Account> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = if account.id == 0 {
            users::ActiveModel {
                name: Set(account.name.clone()),
                username: Set(account.username.clone()),
                password_hash: Set(account.password_hash().map(str::to_string)),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?
        } else {
            let existing = users::Entity::find_by_id(account.id)
                .one(&self.conn)
                .await
                .context("Failed to query user for update")?
                .ok_or_else(|| anyhow::anyhow!("User not found: {}", account.id))?;

            let mut active: users::ActiveModel = existing.into();
            active.name = Set(account.name.clone());
            active.username = Set(account.username.clone());
            active.password_hash = Set(account.password_hash().map(str::to_string));
            active.updated_at = Set(now);
            active
                .update(&self.conn)
                .await
                .context("Failed to update user")?
        };

        Ok(Account::from(model))
    }

    /// Returns `false` when no row has this id.
    pub async fn update_name(&self, id: i32, name: &str) -> Result<bool> {
        let Some(existing) = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for rename")?
        else {
            return Ok(false);
        };

        let mut active: users::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(true)
    }
}
