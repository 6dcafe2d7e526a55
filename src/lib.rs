pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::store::MovieStore;

/// Shared application state, built once at startup and cloned per
/// request. Handlers read configuration from here, never from the
/// process environment.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
    pub store: Arc<dyn MovieStore>,
}

pub fn app(state: AppState) -> Router {
    use handlers::movies;

    // Movie routes sit behind the bearer-token gate; login and the
    // service endpoints stay public.
    let protected = Router::new()
        .route("/api/movies", get(movies::movie_list).post(movies::movie_create))
        .route(
            "/api/movies/:id",
            get(movies::movie_get)
                .put(movies::movie_update)
                .delete(movies::movie_delete),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_auth));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/login", post(handlers::auth::login))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Movie API (Rust)",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Movie catalog REST API with JWT bearer authentication",
        "endpoints": {
            "login": "POST /api/login (public)",
            "movies": "GET|POST /api/movies (bearer token required)",
            "movie": "GET|PUT|DELETE /api/movies/:id (bearer token required)",
            "health": "GET /health (public)"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": err.to_string()
            })),
        ),
    }
}
