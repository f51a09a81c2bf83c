use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::views::{Layout, LoginPage, render};
use super::{ApiError, AppState, flash, validation};
use crate::models::user::Account;
use crate::services::AuthError;

/// Session key holding the logged-in account id.
const ACCOUNT_KEY: &str = "account_id";

/// The account that passed [`require_login`], available to protected handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Account);

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for every protected route: anonymous requests are sent to the login
/// page before the handler runs.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(account) = current_account(&state, &session).await? {
        tracing::Span::current().record("user_id", account.id);
        request.extensions_mut().insert(CurrentUser(account));
        return Ok(next.run(request).await);
    }

    tracing::debug!(path = %request.uri().path(), "Anonymous request to protected route");
    flash::push(&session, flash::LOGIN_REQUIRED).await?;
    Ok(Redirect::to("/login").into_response())
}

/// Resolves the session's account. A session pointing at an account that
/// no longer exists is treated as anonymous and cleaned up.
pub async fn current_account(
    state: &AppState,
    session: &Session,
) -> Result<Option<Account>, ApiError> {
    let Some(id) = session.get::<i32>(ACCOUNT_KEY).await? else {
        return Ok(None);
    };

    match state.auth.get_account(id).await? {
        Some(account) => Ok(Some(account)),
        None => {
            tracing::warn!(account_id = id, "Session refers to a missing account");
            session.remove::<i32>(ACCOUNT_KEY).await?;
            Ok(None)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let layout = Layout::load(&state, &session).await?;
    render(&LoginPage { layout })
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    let Ok((username, password)) = validation::validate_credentials(&form.username, &form.password)
    else {
        flash::push(&session, flash::INVALID_INPUT).await?;
        return Ok(Redirect::to("/login"));
    };

    match state.auth.authenticate(username, password).await {
        Ok(account) => {
            session.cycle_id().await?;
            session.insert(ACCOUNT_KEY, account.id).await?;
            flash::push(&session, flash::LOGIN_SUCCESS).await?;
            tracing::info!(username = %account.username, "Login succeeded");
            Ok(Redirect::to("/"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(username = %username, "Login failed");
            flash::push(&session, flash::INVALID_CREDENTIALS).await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(
    session: Session,
    Extension(CurrentUser(account)): Extension<CurrentUser>,
) -> Result<Redirect, ApiError> {
    session.clear().await;
    session.cycle_id().await?;
    flash::push(&session, flash::LOGGED_OUT).await?;
    tracing::info!(username = %account.username, "Logged out");
    Ok(Redirect::to("/"))
}
