//! Sample data command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::movie::{MovieInput, SAMPLE_MOVIES};

/// Display name given to the admin account by `forge`.
const SAMPLE_NAME: &str = "Grey Li";

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;

    let movies: Vec<MovieInput> = SAMPLE_MOVIES
        .iter()
        .map(|(title, year)| MovieInput::new(*title, *year))
        .collect();
    let added = store.add_movies(&movies).await?;

    if let Some(account) = store.first_user().await? {
        store.update_user_name(account.id, SAMPLE_NAME).await?;
        println!("✓ Display name set to {SAMPLE_NAME}");
    } else {
        println!("No admin account yet. Create one with: watchlist admin");
    }

    println!("✓ Added {added} movies.");
    Ok(())
}
