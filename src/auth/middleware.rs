//! Bearer-token middleware for admin routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::auth::{token, AuthError};
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Require a valid admin session token.
///
/// Distinguishes a missing token (401) from a token that fails signature or
/// expiry checks (401) from a well-signed token whose role is not `"admin"`
/// (403). Verified claims are attached to the request for handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = token::verify(bearer, &state.config.auth.jwt_secret)?;

    if claims.role != "admin" {
        tracing::warn!(role = %claims.role, "Admin access denied for non-admin token");
        return Err(AuthError::Forbidden.into());
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
