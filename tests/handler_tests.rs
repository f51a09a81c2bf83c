//! Handlers driven through in-memory services, with no database behind them.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tower::ServiceExt;
use watchlist::api::AppState;
use watchlist::config::{Config, SecurityConfig};
use watchlist::models::movie::{Movie, MovieInput};
use watchlist::models::user::Account;
use watchlist::services::{AuthError, AuthService, MovieError, MovieService};

#[derive(Default)]
struct InMemoryMovies {
    rows: Mutex<Vec<Movie>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl MovieService for InMemoryMovies {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(MovieError::NotFound(id))
    }

    async fn insert(&self, input: MovieInput) -> Result<Movie, MovieError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let movie = Movie {
            id: *next_id,
            title: input.title,
            year: input.year,
        };
        self.rows.lock().unwrap().push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: i32, input: MovieInput) -> Result<Movie, MovieError> {
        let mut rows = self.rows.lock().unwrap();
        let movie = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(MovieError::NotFound(id))?;
        movie.title = input.title;
        movie.year = input.year;
        Ok(movie.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            Err(MovieError::NotFound(id))
        } else {
            Ok(())
        }
    }
}

struct SingleAccount {
    account: Mutex<Account>,
    deleted: AtomicBool,
}

impl SingleAccount {
    fn new(username: &str, password: &str) -> Self {
        let mut account = Account::new(username, "Admin");
        account.id = 1;
        account
            .set_password(
                password,
                &SecurityConfig {
                    argon2_memory_cost_kib: 1024,
                    argon2_time_cost: 1,
                    argon2_parallelism: 1,
                },
            )
            .unwrap();
        Self {
            account: Mutex::new(account),
            deleted: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl AuthService for SingleAccount {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let account = self.account.lock().unwrap().clone();
        if account.username == username && account.validate_password(password) {
            Ok(account)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn get_account(&self, id: i32) -> Result<Option<Account>, AuthError> {
        if self.deleted.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let account = self.account.lock().unwrap().clone();
        Ok((account.id == id).then_some(account))
    }

    async fn rename(&self, id: i32, name: &str) -> Result<(), AuthError> {
        let mut account = self.account.lock().unwrap();
        if account.id != id {
            return Err(AuthError::NotFound(id));
        }
        account.name = name.to_string();
        Ok(())
    }

    async fn upsert_admin(&self, _username: &str, _password: &str) -> Result<Account, AuthError> {
        Err(AuthError::Internal("not supported in tests".to_string()))
    }
}

fn app(movies: Arc<InMemoryMovies>) -> Router {
    app_with_account(movies, Arc::new(SingleAccount::new("admin", "secret")))
}

fn app_with_account(movies: Arc<InMemoryMovies>, account: Arc<SingleAccount>) -> Router {
    let state = AppState::new(Config::default(), movies, account, None);
    watchlist::api::router(Arc::new(state))
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

#[tokio::test]
async fn test_gate_runs_before_handler() {
    let movies = Arc::new(InMemoryMovies::default());
    let app = app(movies.clone());

    let response = app
        .clone()
        .oneshot(form_post("/", "title=Leon&year=1994", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    assert!(movies.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_maps_to_account() {
    let movies = Arc::new(InMemoryMovies::default());
    let app = app(movies.clone());

    let login = app
        .clone()
        .oneshot(form_post("/login", "username=admin&password=secret", None))
        .await
        .unwrap();
    assert_eq!(login.headers()[header::LOCATION], "/");
    let cookie = session_cookie(&login);

    let created = app
        .clone()
        .oneshot(form_post("/", "title=Leon&year=1994", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(created.headers()[header::LOCATION], "/");

    let rows = movies.rows.lock().unwrap().clone();
    assert_eq!(
        rows,
        vec![Movie {
            id: 1,
            title: "Leon".to_string(),
            year: "1994".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_wrong_password_does_not_log_in() {
    let movies = Arc::new(InMemoryMovies::default());
    let app = app(movies.clone());

    let login = app
        .clone()
        .oneshot(form_post("/login", "username=admin&password=guess", None))
        .await
        .unwrap();
    assert_eq!(login.headers()[header::LOCATION], "/login");
    let cookie = session_cookie(&login);

    let response = app
        .oneshot(form_post("/", "title=Leon&year=1994", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.headers()[header::LOCATION], "/login");
    assert!(movies.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_for_deleted_account_is_anonymous() {
    let movies = Arc::new(InMemoryMovies::default());
    let account = Arc::new(SingleAccount::new("admin", "secret"));
    let app = app_with_account(movies.clone(), account.clone());

    let login = app
        .clone()
        .oneshot(form_post("/login", "username=admin&password=secret", None))
        .await
        .unwrap();
    let cookie = session_cookie(&login);

    let index = app.clone().oneshot(get("/", &cookie)).await.unwrap();
    let html = body_text(index).await;
    assert!(!html.contains("<h2>Watchlist</h2>"));
    assert!(html.contains("/logout"));

    account.deleted.store(true, Ordering::SeqCst);

    let response = app
        .clone()
        .oneshot(form_post("/", "title=Leon&year=1994", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    assert!(movies.rows.lock().unwrap().is_empty());

    let index = app.oneshot(get("/", &cookie)).await.unwrap();
    let html = body_text(index).await;
    assert!(html.contains("<h2>Watchlist</h2>"));
    assert!(!html.contains("/logout"));
    assert!(html.contains("/login"));
}
