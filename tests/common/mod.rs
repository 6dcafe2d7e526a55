#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use movie_api_rust::auth::TokenService;
use movie_api_rust::config::{AppConfig, AuthConfig, DatabaseConfig};
use movie_api_rust::store::memory::MemoryMovieStore;
use movie_api_rust::{app, AppState};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "hunter2";
pub const SECRET: &str = "integration-test-secret";

/// Fresh router over an empty in-memory store, so tests are isolated
/// and need no external database.
pub fn test_app() -> Router {
    let config = AppConfig {
        port: 0,
        auth: AuthConfig {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
            jwt_secret: SECRET.to_string(),
        },
        database: DatabaseConfig {
            url: None,
            username: "unused".to_string(),
            password: "unused".to_string(),
            host: "localhost:27017".to_string(),
            database: "MovieDB".to_string(),
        },
    };
    let tokens = TokenService::new(SECRET).expect("non-empty secret");

    app(AppState {
        config: Arc::new(config),
        tokens,
        store: Arc::new(MemoryMovieStore::new()),
    })
}

/// Fire one request at the router and decode the JSON body (if any).
pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, body))
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request builds")
}

pub fn bearer_json_request(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

/// Log in with the test credentials and return the issued token.
pub async fn login(app: &Router) -> Result<String> {
    let payload = json!({ "username": USERNAME, "password": PASSWORD });
    let (status, body) = send(app, json_request("POST", "/api/login", &payload)).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {status} {body}");

    Ok(body["token"]
        .as_str()
        .expect("token in login response")
        .to_string())
}
