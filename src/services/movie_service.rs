//! Domain service for the movie list.
//!
//! Handlers only see this trait, so they can run against any backing store.

use thiserror::Error;

use crate::models::movie::{Movie, MovieInput};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies in identifier order.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    async fn insert(&self, input: MovieInput) -> Result<Movie, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn update(&self, id: i32, input: MovieInput) -> Result<Movie, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id, including
    /// when it was already deleted.
    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
