//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files; the
//! same fields can be overridden from the environment (see `loader`).

use serde::{Deserialize, Serialize};

/// Root configuration for the API server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener and environment settings.
    pub server: ServerConfig,

    /// Cross-origin policy for the frontend.
    pub cors: CorsConfig,

    /// Submission store connection settings.
    pub database: DatabaseConfig,

    /// Outbound email settings.
    pub email: EmailConfig,

    /// Admin credential pair.
    pub admin: AdminConfig,

    /// Session token settings.
    pub auth: AuthConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,

    /// Deployment environment label reported by the health endpoint.
    pub environment: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            environment: "development".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Cross-origin configuration. Exactly one origin is allowed, with
/// credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The frontend origin allowed to call the API.
    pub frontend_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            frontend_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// Submission store configuration.
///
/// A missing URI is not an error: the server runs without persistence and
/// the intake pipeline degrades to log-only behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB connection string. `None` disables persistence.
    pub uri: Option<String>,

    /// Database name holding the contacts collection.
    pub name: String,

    /// Per-operation timeout in seconds for store reads and writes.
    pub op_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            name: "portfolio".to_string(),
            op_timeout_secs: 5,
        }
    }
}

/// Outbound email configuration.
///
/// The notifier counts as configured only when host, user, and password are
/// all present; otherwise submissions are logged instead of mailed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// SMTP relay host.
    pub host: Option<String>,

    /// SMTP port (STARTTLS).
    pub port: u16,

    /// SMTP username.
    pub user: Option<String>,

    /// SMTP password.
    pub password: Option<String>,

    /// From address; falls back to `user` when unset.
    pub from: Option<String>,

    /// Destination address; falls back to `user` when unset.
    pub to: Option<String>,

    /// Timeout for a single send in seconds.
    pub send_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            user: None,
            password: None,
            from: None,
            to: None,
            send_timeout_secs: 10,
        }
    }
}

/// Admin credential configuration.
///
/// A single static pair checked by the login endpoint. The stored `Admin`
/// collection from earlier iterations of the system is vestigial and never
/// consulted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Admin username.
    pub username: String,

    /// Admin password, compared verbatim.
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            // WARNING: placeholder credentials! Override in production.
            username: "admin".to_string(),
            password: "cyber123".to_string(),
        }
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens.
    pub jwt_secret: String,

    /// Token lifetime in hours.
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: placeholder secret! Override in production.
            jwt_secret: "cyber-portfolio-secret".to_string(),
            token_ttl_hours: 24,
        }
    }
}

/// Rate limiting configuration.
///
/// Two independent sliding windows keyed by client IP: a global cap over all
/// API traffic and a tighter cap on contact submissions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per window across the whole API, per IP.
    pub global_max_requests: usize,

    /// Global window length in seconds.
    pub global_window_secs: u64,

    /// Maximum contact submissions per window, per IP.
    pub contact_max_requests: usize,

    /// Contact window length in seconds.
    pub contact_window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            global_max_requests: 100,
            global_window_secs: 15 * 60,
            contact_max_requests: 5,
            contact_window_secs: 60 * 60,
        }
    }
}
