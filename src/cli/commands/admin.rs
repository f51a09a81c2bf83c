//! Admin account command handler

use super::prompt;
use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

pub async fn cmd_admin(config: &Config, username: Option<String>) -> anyhow::Result<()> {
    let username = match username {
        Some(name) => name,
        None => prompt("Username: ")?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        println!("Username cannot be empty.");
        return Ok(());
    }

    let password = prompt("Password: ")?;
    if password.is_empty() {
        println!("Password cannot be empty.");
        return Ok(());
    }
    if prompt("Repeat for confirmation: ")? != password {
        println!("Passwords do not match. Nothing changed.");
        return Ok(());
    }

    let store = Store::from_config(&config.general).await?;
    let service = SeaOrmAuthService::new(store, config.security.clone());
    let account = service.upsert_admin(&username, &password).await?;

    println!("✓ Admin account '{}' saved (ID: {}).", account.username, account.id);
    Ok(())
}
