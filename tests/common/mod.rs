// Shared harness for database-backed tests.
//
// The suite runs against the database named by DATABASE_URL (picked up from
// .env like the server does) and skips cleanly when none is provisioned.
// Migrations are applied on first connect; sqlx serializes concurrent runs.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use catalog_api::app::app;
use catalog_api::config::{AppConfig, Environment};
use catalog_api::state::AppState;

pub const SECRET: &str = "catalog-db-test-secret";

/// Build the app against a real database, or `None` when DATABASE_URL is not
/// set so callers can skip.
pub async fn try_app() -> Result<Option<Router>> {
    let _ = dotenvy::dotenv();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database tests");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let config = AppConfig {
        environment: Environment::Development,
        port: 0,
        database_url,
        jwt_secret: SECRET.into(),
        token_ttl_secs: 3600,
    };
    Ok(Some(app(AppState::new(config, pool))))
}

/// Fire one request at the router and decode the JSON body (Null for empty
/// bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));

    let response = app.clone().oneshot(builder.body(body)?).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// Unique per-run identifiers keep reruns and parallel tests from colliding
/// on unique constraints.
pub fn unique(tag: &str) -> String {
    format!("{tag}-{}", Uuid::new_v4().simple())
}

/// Register a fresh user and log in, returning (email, token).
pub async fn register_and_login(app: &Router, tag: &str) -> Result<(String, String)> {
    let email = format!("{}@example.com", unique(tag));
    let password = "correct-horse-battery";

    let (status, _) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token in login body").to_string();

    Ok((email, token))
}

/// Create a store with a unique name, returning its id.
pub async fn create_store(app: &Router, token: &str) -> Result<String> {
    let (status, body) = send(
        app,
        "POST",
        "/stores",
        Some(token),
        Some(json!({"name": unique("store"), "description": "test store"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_str().expect("store id").to_string())
}
