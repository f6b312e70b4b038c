//! Basic auth middleware for the task routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;

use crate::error::ApiError;
use crate::state::AppState;

/// Reject requests whose `Authorization` header does not carry the
/// configured basic auth credentials.
pub async fn basic_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let encoded = header_value
        .strip_prefix("Basic ")
        .ok_or_else(|| ApiError::unauthorized("Basic auth required"))?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;

    let (user, pass) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;

    if user != state.config.auth_user || pass != state.config.auth_pass {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    Ok(next.run(request).await)
}
