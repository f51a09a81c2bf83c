//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::Store;
use crate::models::movie::{Movie, MovieInput};
use crate::services::movie_service::{MovieError, MovieService};
use async_trait::async_trait;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn insert(&self, input: MovieInput) -> Result<Movie, MovieError> {
        Ok(self.store.add_movie(&input).await?)
    }

    async fn update(&self, id: i32, input: MovieInput) -> Result<Movie, MovieError> {
        self.store
            .update_movie(id, &input)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if self.store.remove_movie(id).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(id))
        }
    }
}
