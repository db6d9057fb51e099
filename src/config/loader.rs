//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration.
///
/// Starts from defaults, merges the TOML file at `path` when given, then
/// applies environment overrides. The environment always wins so deployments
/// can keep a checked-in config file and still inject secrets at runtime.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env(&mut config);
    Ok(config)
}

/// Apply environment-variable overrides to a loaded configuration.
///
/// Recognized variables mirror the deployment environment of the original
/// site: `PORT`, `APP_ENV`, `FRONTEND_URL`, `MONGODB_URI`, `EMAIL_HOST`,
/// `EMAIL_PORT`, `EMAIL_USER`, `EMAIL_PASS`, `EMAIL_FROM`, `EMAIL_TO`,
/// `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `JWT_SECRET`.
pub fn apply_env(config: &mut AppConfig) {
    if let Some(port) = env_var("PORT") {
        match port.parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!(value = %port, "Ignoring unparseable PORT"),
        }
    }
    if let Some(env) = env_var("APP_ENV") {
        config.server.environment = env;
    }
    if let Some(origin) = env_var("FRONTEND_URL") {
        config.cors.frontend_origin = origin;
    }
    if let Some(uri) = env_var("MONGODB_URI") {
        config.database.uri = Some(uri);
    }
    if let Some(host) = env_var("EMAIL_HOST") {
        config.email.host = Some(host);
    }
    if let Some(port) = env_var("EMAIL_PORT") {
        match port.parse() {
            Ok(port) => config.email.port = port,
            Err(_) => tracing::warn!(value = %port, "Ignoring unparseable EMAIL_PORT"),
        }
    }
    if let Some(user) = env_var("EMAIL_USER") {
        config.email.user = Some(user);
    }
    if let Some(pass) = env_var("EMAIL_PASS") {
        config.email.password = Some(pass);
    }
    if let Some(from) = env_var("EMAIL_FROM") {
        config.email.from = Some(from);
    }
    if let Some(to) = env_var("EMAIL_TO") {
        config.email.to = Some(to);
    }
    if let Some(username) = env_var("ADMIN_USERNAME") {
        config.admin.username = username;
    }
    if let Some(password) = env_var("ADMIN_PASSWORD") {
        config.admin.password = password;
    }
    if let Some(secret) = env_var("JWT_SECRET") {
        config.auth.jwt_secret = secret;
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.cors.frontend_origin, "http://localhost:3000");
        assert!(config.database.uri.is_none());
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.rate_limit.global_max_requests, 100);
        assert_eq!(config.rate_limit.contact_max_requests, 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [admin]
            password = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.admin.password, "s3cret");
        // Untouched sections fall back to defaults.
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.rate_limit.contact_window_secs, 3600);
        assert_eq!(config.email.port, 587);
    }

    #[test]
    fn test_database_uri_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            uri = "mongodb://localhost:27017"
            name = "portfolio_test"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database.uri.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.database.name, "portfolio_test");
    }
}
