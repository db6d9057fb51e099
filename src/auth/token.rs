//! Session token issue and verification.
//!
//! Tokens are HS256 JWTs carrying `{sub, role, iat, exp}`. Verification is a
//! pure check of signature and expiry against the configured secret; there is
//! no server-side token state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Claims embedded in an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, always `"admin"` for tokens issued here.
    pub sub: String,
    /// Role checked by the admin middleware.
    pub role: String,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Issue an admin token expiring `ttl_hours` from now.
pub fn issue(secret: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: "admin".to_string(),
        role: "admin".to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)
}

/// Verify a token's signature and expiry, returning its claims.
///
/// Role is deliberately not checked here: a well-signed token with the wrong
/// role verifies but is rejected later as `Forbidden`.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}
