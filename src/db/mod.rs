use crate::config::GeneralConfig;
use crate::models::movie::{Movie, MovieInput};
use crate::models::user::Account;
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects with the configured pool size and applies pending migrations.
    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let store = Self::open(db_url, max_connections, min_connections).await?;
        store.migrate(false).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    /// Connects without touching the schema.
    pub async fn open(db_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        Ok(Self { conn })
    }

    /// Applies the schema. With `drop_existing`, every table is dropped first.
    pub async fn migrate(&self, drop_existing: bool) -> Result<()> {
        if drop_existing {
            migrator::Migrator::fresh(&self.conn).await?;
            info!("Dropped existing tables and recreated schema");
        } else {
            migrator::Migrator::up(&self.conn, None).await?;
        }
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Movies
    // ========================================================================

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list_all().await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn movie_count(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    pub async fn add_movie(&self, input: &MovieInput) -> Result<Movie> {
        self.movie_repo().insert(input).await
    }

    pub async fn add_movies(&self, inputs: &[MovieInput]) -> Result<usize> {
        self.movie_repo().insert_many(inputs).await
    }

    pub async fn update_movie(&self, id: i32, input: &MovieInput) -> Result<Option<Movie>> {
        self.movie_repo().update(id, input).await
    }

    pub async fn remove_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().remove(id).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user(&self, id: i32) -> Result<Option<Account>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn first_user(&self) -> Result<Option<Account>> {
        self.user_repo().first().await
    }

    pub async fn save_user(&self, account: &Account) -> Result<Account> {
        self.user_repo().save(account).await
    }

    pub async fn update_user_name(&self, id: i32, name: &str) -> Result<bool> {
        self.user_repo().update_name(id, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;

    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_pool() {
        // A memory database only survives on a single pooled connection.
        let general = GeneralConfig {
            database_path: "sqlite::memory:".to_string(),
            max_db_connections: 1,
            min_db_connections: 1,
            ..GeneralConfig::default()
        };

        let store = Store::from_config(&general).await.unwrap();
        store
            .add_movie(&MovieInput::new("Leon", "1994"))
            .await
            .unwrap();
        assert_eq!(store.movie_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_movie_crud() {
        let store = memory_store().await;

        let leon = store
            .add_movie(&MovieInput::new("Leon", "1994"))
            .await
            .unwrap();
        let walle = store
            .add_movie(&MovieInput::new("WALL-E", "2008"))
            .await
            .unwrap();
        assert!(walle.id > leon.id);

        let listed = store.list_movies().await.unwrap();
        assert_eq!(listed, vec![leon.clone(), walle.clone()]);

        let updated = store
            .update_movie(leon.id, &MovieInput::new("Léon", "1994"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Léon");
        assert!(
            store
                .update_movie(9999, &MovieInput::new("x", "1"))
                .await
                .unwrap()
                .is_none()
        );

        assert!(store.remove_movie(leon.id).await.unwrap());
        assert!(!store.remove_movie(leon.id).await.unwrap());
        assert_eq!(store.list_movies().await.unwrap(), vec![walle]);
    }

    #[tokio::test]
    async fn test_add_movies_batch() {
        let store = memory_store().await;
        let inputs: Vec<MovieInput> = crate::models::movie::SAMPLE_MOVIES
            .iter()
            .map(|(title, year)| MovieInput::new(*title, *year))
            .collect();

        assert_eq!(store.add_movies(&inputs).await.unwrap(), 10);
        assert_eq!(store.movie_count().await.unwrap(), 10);
        assert_eq!(store.add_movies(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_user_save_and_lookup() {
        let store = memory_store().await;
        let params = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        };

        let mut account = Account::new("admin", "Admin");
        account.set_password("secret", &params).unwrap();
        let saved = store.save_user(&account).await.unwrap();
        assert!(saved.id > 0);

        let loaded = store.get_user_by_username("admin").await.unwrap().unwrap();
        assert!(loaded.validate_password("secret"));
        assert_eq!(store.first_user().await.unwrap().unwrap().id, saved.id);

        assert!(store.update_user_name(saved.id, "Grey Li").await.unwrap());
        assert_eq!(store.get_user(saved.id).await.unwrap().unwrap().name, "Grey Li");
        assert!(!store.update_user_name(9999, "Nobody").await.unwrap());
        assert!(store.get_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_migrate_drop_clears_rows() {
        let store = memory_store().await;
        store
            .add_movie(&MovieInput::new("Leon", "1994"))
            .await
            .unwrap();

        store.migrate(true).await.unwrap();
        assert_eq!(store.movie_count().await.unwrap(), 0);
    }
}
