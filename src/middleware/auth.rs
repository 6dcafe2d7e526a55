use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated identity extracted from a verified bearer token and
/// attached to the request before the handler runs.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub identity: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { identity: claims.sub }
    }
}

/// Bearer-token gate for the movie routes. A request without an
/// `Authorization` header is rejected with 401; one whose token fails
/// verification with 403. Either way the handler never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Authentication token not provided."))?;

    // Anything other than `Bearer <token>` falls through to
    // verification as an empty token, so a present-but-wrong header is
    // a 403 rather than a 401.
    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    let claims = state.tokens.verify(token).map_err(|err| {
        tracing::debug!("token rejected: {err}");
        ApiError::forbidden("Token authentication failed.")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
