use axum::{
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::views::{ErrorPage, render_page};
use crate::services::{AuthError, MovieError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    MethodNotAllowed,

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            ApiError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                ErrorPage::not_found()
            }
            ApiError::MethodNotAllowed => ErrorPage::method_not_allowed(),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                ErrorPage::internal()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorPage::internal()
            }
        };

        match render_page(&page) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, page.title).into_response()
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => ApiError::not_found("Movie", id),
            MovieError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotFound(id) => ApiError::not_found("Account", id),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ApiError::InternalError(format!("Session error: {err}"))
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        ApiError::InternalError(format!("Template error: {err}"))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Router fallback for paths no route matches.
pub async fn not_found_fallback(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Swaps the router's bare 405 for the rendered page, keeping `Allow`.
pub async fn render_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rendered = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rendered.headers_mut().insert(header::ALLOW, allow);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_status() {
        assert_eq!(
            ApiError::from(MovieError::NotFound(7)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(MovieError::Database("locked".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(AuthError::Internal("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_internal_details_are_not_rendered() {
        use http_body_util::BodyExt;

        let response =
            ApiError::InternalError("secret connection string".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8_lossy(&bytes);
        assert!(body.contains("500 - Internal Server Error"));
        assert!(!body.contains("secret connection string"));
    }
}
