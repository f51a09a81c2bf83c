use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::views::{EditPage, IndexPage, Layout, render};
use super::{ApiError, AppState, flash, validation};

#[derive(Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
}

/// Path ids that are not integers name no movie.
fn parse_movie_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found("Movie", raw))
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let layout = Layout::load(&state, &session).await?;
    let movies = state.movies.list().await?;
    render(&IndexPage { layout, movies })
}

/// POST /
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, ApiError> {
    let input = match validation::validate_movie(&form.title, &form.year) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!("Rejected new movie: {}", e);
            flash::push(&session, flash::INVALID_INPUT).await?;
            return Ok(Redirect::to("/"));
        }
    };

    state.movies.insert(input).await?;
    flash::push(&session, flash::ITEM_CREATED).await?;
    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_movie_id(&id)?;
    let movie = state.movies.get(id).await?;
    let layout = Layout::load(&state, &session).await?;
    render(&EditPage { layout, movie })
}

/// POST /movie/edit/{id}
pub async fn edit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, ApiError> {
    let id = parse_movie_id(&id)?;
    let movie = state.movies.get(id).await?;

    let input = match validation::validate_movie(&form.title, &form.year) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!("Rejected edit of movie {}: {}", movie.id, e);
            flash::push(&session, flash::INVALID_INPUT).await?;
            return Ok(Redirect::to(&format!("/movie/edit/{}", movie.id)));
        }
    };

    state.movies.update(movie.id, input).await?;
    flash::push(&session, flash::ITEM_UPDATED).await?;
    Ok(Redirect::to("/"))
}

/// POST /movie/delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = parse_movie_id(&id)?;
    state.movies.delete(id).await?;
    flash::push(&session, flash::ITEM_DELETED).await?;
    Ok(Redirect::to("/"))
}
