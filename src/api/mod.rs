use axum::{
    Router, middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService};

pub mod auth;
mod error;
pub mod flash;
mod movies;
mod observability;
mod settings;
pub mod validation;
pub mod views;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub movies: Arc<dyn MovieService>,

    pub auth: Arc<dyn AuthService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: Config,
        movies: Arc<dyn MovieService>,
        auth: Arc<dyn AuthService>,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            movies,
            auth,
            prometheus_handle,
        }
    }
}

/// Wires the `SeaORM` services over an already-migrated store.
#[must_use]
pub fn create_app_state(
    config: Config,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let movies = Arc::new(SeaOrmMovieService::new(store.clone()));
    let auth = Arc::new(SeaOrmAuthService::new(store, config.security.clone()));

    Arc::new(AppState::new(config, movies, auth, prometheus_handle))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::from_config(&config.general).await?;

    Ok(create_app_state(config, store, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_inactivity_minutes,
        )));

    Router::new()
        .merge(create_public_router())
        .merge(create_protected_router(state.clone()))
        .fallback(error::not_found_fallback)
        .layer(middleware::map_response(error::render_method_not_allowed))
        .layer(session_layer)
        .layer(middleware::from_fn(observability::track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(movies::index))
        .route("/login", get(auth::login_form).post(auth::login))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Gate each method router so unsupported methods still reach the 405 page.
    let gate = middleware::from_fn_with_state(state, auth::require_login);

    Router::new()
        .route("/", post(movies::create).route_layer(gate.clone()))
        .route(
            "/movie/edit/{id}",
            get(movies::edit_form)
                .post(movies::edit)
                .route_layer(gate.clone()),
        )
        .route(
            "/movie/delete/{id}",
            post(movies::delete).route_layer(gate.clone()),
        )
        .route(
            "/settings",
            get(settings::settings_form)
                .post(settings::update_settings)
                .route_layer(gate.clone()),
        )
        .route("/logout", get(auth::logout).route_layer(gate.clone()))
        .route(
            "/metrics",
            get(observability::get_metrics).route_layer(gate),
        )
}
