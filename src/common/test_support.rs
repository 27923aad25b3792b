//! Shared fixtures for router-level tests: an in-memory database, the full
//! router, token helpers and seed data.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::auth::{models::ClerkClaims, tokens::issue_company_token, AuthConfig};
use crate::common::{
    dev_mode::DevModeConfig, generate_company_id, generate_job_id, migrations, now_millis,
    AppState,
};
use crate::services::ResumeStorage;

pub const CLERK_SECRET: &str = "test_clerk_secret";
pub const COMPANY_SECRET: &str = "test_company_secret";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub resumes_dir: std::path::PathBuf,
    _dir: TempDir,
}

pub async fn test_app() -> TestApp {
    // A single long-lived connection keeps the in-memory database alive
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    build_test_app(db, dir).await
}

/// App backed by a database file with a pool of `connections`, so concurrent
/// requests run on separate SQLite connections
pub async fn file_backed_test_app(connections: u32) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("jobboard.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let db = SqlitePoolOptions::new()
        .max_connections(connections)
        .min_connections(connections)
        .connect_with(options)
        .await
        .unwrap();
    build_test_app(db, dir).await
}

async fn build_test_app(db: SqlitePool, dir: TempDir) -> TestApp {
    migrations::run_migrations(&db).await.unwrap();

    let resumes_dir = dir.path().join("resumes");

    let state = AppState {
        db: db.clone(),
        resume_storage: Arc::new(ResumeStorage::local(&resumes_dir, "")),
        auth: AuthConfig::with_secrets(CLERK_SECRET, COMPANY_SECRET),
        dev_mode: DevModeConfig::disabled(),
    };

    let router = crate::build_router(Arc::new(RwLock::new(state)));

    TestApp {
        router,
        db,
        resumes_dir,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

pub fn clerk_token(user_id: &str) -> String {
    let claims = ClerkClaims {
        sub: user_id.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
        iss: None,
        azp: None,
        sid: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(CLERK_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn company_token(company_id: &str) -> String {
    issue_company_token(COMPANY_SECRET, company_id, None).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_as_user(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", clerk_token(user_id)))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json_as_user(uri: &str, user_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", clerk_token(user_id)))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_as_company(uri: &str, company_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("token", company_token(company_id))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json_as_company(uri: &str, company_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("token", company_token(company_id))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart body with a single file field
pub fn multipart_as_user(
    uri: &str,
    user_id: &str,
    field: &str,
    filename: &str,
    content: &[u8],
) -> Request<Body> {
    let boundary = "----jobboard-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", clerk_token(user_id)))
        .body(Body::from(body))
        .unwrap()
}

pub async fn seed_user(db: &SqlitePool, user_id: &str, name: &str, email: &str) {
    sqlx::query("INSERT INTO users (id, name, email, image, resume) VALUES (?, ?, ?, '', '')")
        .bind(user_id)
        .bind(name)
        .bind(email)
        .execute(db)
        .await
        .unwrap();
}

pub async fn seed_company(db: &SqlitePool, name: &str, email: &str) -> String {
    let id = generate_company_id();
    sqlx::query("INSERT INTO companies (id, name, email, image) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(email)
        .bind(format!("https://img.example.com/{}.png", name))
        .execute(db)
        .await
        .unwrap();
    id
}

pub async fn seed_job(
    db: &SqlitePool,
    company_id: &str,
    title: &str,
    location: &str,
    visible: bool,
) -> String {
    let id = generate_job_id();
    sqlx::query(
        r#"
        INSERT INTO jobs (id, title, description, location, category, level, salary, date, visible, company_id)
        VALUES (?, ?, 'Build things', ?, 'Programming', 'Intermediate level', 85000, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(title)
    .bind(location)
    .bind(now_millis())
    .bind(visible)
    .bind(company_id)
    .execute(db)
    .await
    .unwrap();
    id
}
