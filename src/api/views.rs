//! Page contexts handed to the askama templates under `templates/`.

use askama::Template;
use axum::response::Html;
use tower_sessions::Session;

use super::{ApiError, AppState, auth, flash};
use crate::models::movie::Movie;

/// Shared header data: who is logged in and what to flash.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub account_name: Option<String>,
    pub flashes: Vec<String>,
}

impl Layout {
    /// Resolves the session's account and drains its pending flashes.
    pub async fn load(state: &AppState, session: &Session) -> Result<Self, ApiError> {
        let account = auth::current_account(state, session).await?;
        let flashes = flash::take(session).await?;

        Ok(Self {
            account_name: account.map(|a| a.name),
            flashes,
        })
    }

    #[must_use]
    pub const fn logged_in(&self) -> bool {
        self.account_name.is_some()
    }

    #[must_use]
    pub fn heading(&self) -> String {
        match &self.account_name {
            Some(name) => format!("{name}'s Watchlist"),
            None => "Watchlist".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub layout: Layout,
    pub movies: Vec<Movie>,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditPage {
    pub layout: Layout,
    pub movie: Movie,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsPage {
    pub layout: Layout,
    pub name: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status_code: u16,
    pub title: &'static str,
    pub message: &'static str,
}

impl ErrorPage {
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            status_code: 404,
            title: "404 - Page Not Found",
            message: "The page you are looking for does not exist.",
        }
    }

    #[must_use]
    pub const fn method_not_allowed() -> Self {
        Self {
            status_code: 405,
            title: "405 - Method Not Allowed",
            message: "This page does not accept that kind of request.",
        }
    }

    #[must_use]
    pub const fn internal() -> Self {
        Self {
            status_code: 500,
            title: "500 - Internal Server Error",
            message: "Something went wrong on our side. Please try again later.",
        }
    }
}

pub fn render_page<T: Template>(page: &T) -> Result<String, askama::Error> {
    page.render()
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, ApiError> {
    Ok(Html(render_page(page)?))
}
