use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

/// Fields are optional so an incomplete body compares unequal and
/// yields a 401 instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/login - validate the static credential pair and hand out
/// a bearer token good for one hour.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let auth = &state.config.auth;

    let username_ok = payload.username.as_deref() == Some(auth.username.as_str());
    let password_ok = payload.password.as_deref() == Some(auth.password.as_str());
    if !(username_ok && password_ok) {
        tracing::debug!("login rejected for {:?}", payload.username);
        return Err(ApiError::unauthorized("Invalid credentials."));
    }

    let token = state
        .tokens
        .issue(&auth.username)
        .map_err(|err| ApiError::internal_server_error(err.to_string()))?;

    Ok(Json(json!({ "token": token, "expiresIn": "1h" })))
}
