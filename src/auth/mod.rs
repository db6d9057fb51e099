//! Admin authentication subsystem.
//!
//! # Responsibilities
//! - Check the single configured credential pair
//! - Issue and verify signed, time-limited session tokens
//! - Gate the admin query surface behind a Bearer-token middleware
//!
//! # Design Decisions
//! - Stateless tokens: no server-side session record or revocation list;
//!   a token stays valid until its embedded expiry
//! - A credential mismatch never reveals which field was wrong

pub mod middleware;
pub mod service;
pub mod token;

use thiserror::Error;

/// Authentication failure. The display strings are the user-facing messages;
/// `InvalidCredentials` deliberately reads the same for a bad username and a
/// bad password.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Access denied")]
    Forbidden,

    #[error("Server error. Please try again later.")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
