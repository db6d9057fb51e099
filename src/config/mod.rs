//! Configuration management subsystem.
//!
//! # Responsibilities
//! - Define the configuration schema with sensible defaults
//! - Load configuration from an optional TOML file
//! - Apply environment-variable overrides on top

pub mod loader;
pub mod schema;

pub use schema::{
    AdminConfig, AppConfig, AuthConfig, CorsConfig, DatabaseConfig, EmailConfig, RateLimitConfig,
    ServerConfig,
};
