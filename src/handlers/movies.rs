//! CRUD handlers for the movie collection. All of them run behind the
//! auth gate and delegate straight to the store; every branch is one of
//! the typed `StoreError` outcomes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{Movie, MovieInput};
use crate::AppState;

/// GET /api/movies - every movie, in storage-native order.
pub async fn movie_list(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/movies/:id
pub async fn movie_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(state.store.get(&id).await?))
}

/// POST /api/movies - no field validation; whatever arrives is stored.
pub async fn movie_create(
    State(state): State<AppState>,
    Json(input): Json<MovieInput>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let movie = state.store.insert(input).await?;

    Ok((StatusCode::CREATED, Json(movie)))
}

/// PUT /api/movies/:id - partial merge; fields absent from the body
/// keep their stored value.
pub async fn movie_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<MovieInput>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(state.store.update(&id, changes).await?))
}

/// DELETE /api/movies/:id
pub async fn movie_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete(&id).await?;

    Ok(Json(json!({ "message": "Movie removed successfully." })))
}
