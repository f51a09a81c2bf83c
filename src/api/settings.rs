use axum::{
    Extension, Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::views::{Layout, SettingsPage, render};
use super::{ApiError, AppState, flash, validation};

#[derive(Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
}

/// GET /settings
pub async fn settings_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
) -> Result<Html<String>, ApiError> {
    let layout = Layout::load(&state, &session).await?;
    render(&SettingsPage {
        layout,
        name: account.name,
    })
}

/// POST /settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, ApiError> {
    let name = match validation::validate_display_name(&form.name) {
        Ok(name) => name,
        Err(e) => {
            tracing::debug!("Rejected display name: {}", e);
            flash::push(&session, flash::INVALID_INPUT).await?;
            return Ok(Redirect::to("/settings"));
        }
    };

    state.auth.rename(account.id, &name).await?;
    tracing::info!(account_id = account.id, "Display name updated");
    flash::push(&session, flash::SETTINGS_UPDATED).await?;
    Ok(Redirect::to("/"))
}
