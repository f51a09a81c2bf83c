use crate::entities::{movies, prelude::*};
use crate::models::movie::{Movie, MovieInput};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Repository for movie rows
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = Movies::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(row.map(Movie::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Movies::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }

    pub async fn insert(&self, input: &MovieInput) -> Result<Movie> {
        let active_model = movies::ActiveModel {
            title: Set(input.title.clone()),
            year: Set(input.year.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        info!("Added movie {}: {} ({})", model.id, model.title, model.year);
        Ok(Movie::from(model))
    }

    /// Inserts every row in one transaction.
    pub async fn insert_many(&self, inputs: &[MovieInput]) -> Result<usize> {
        if inputs.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let models = inputs.iter().map(|input| movies::ActiveModel {
            title: Set(input.title.clone()),
            year: Set(input.year.clone()),
            created_at: Set(now.clone()),
            ..Default::default()
        });

        let txn = self.conn.begin().await?;
        Movies::insert_many(models).exec(&txn).await?;
        txn.commit().await?;

        Ok(inputs.len())
    }

    /// Returns `None` when no row has this id.
    pub async fn update(&self, id: i32, input: &MovieInput) -> Result<Option<Movie>> {
        let Some(existing) = Movies::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for update")?
        else {
            return Ok(None);
        };

        let mut active: movies::ActiveModel = existing.into();
        active.title = Set(input.title.clone());
        active.year = Set(input.year.clone());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        info!("Updated movie {}: {} ({})", model.id, model.title, model.year);
        Ok(Some(Movie::from(model)))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        if result.rows_affected > 0 {
            info!("Removed movie {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
