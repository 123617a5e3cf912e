use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::application::ports::TokenService;
use crate::domain::value_objects::UserId;

/// Caller identity established from a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Extract the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware for routes that act on behalf of a user.
///
/// On success the request carries an `AuthenticatedUser` extension.
pub async fn auth_middleware(
    State(tokens): State<Arc<dyn TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

    let user_id = tokens.verify(token).map_err(|e| {
        debug!(error = %e, "rejected bearer token");
        ApiError::unauthorized("invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}
