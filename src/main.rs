//! Portfolio Contact Intake API
//!
//! A small JSON API built with Tokio and Axum that accepts contact-form
//! submissions, persists them to MongoDB when a database is configured,
//! forwards them by email when SMTP credentials are configured, and exposes
//! an admin view over stored submissions behind a signed session token.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 PORTFOLIO API                   │
//!                    │                                                 │
//!   Client Request   │  ┌──────────┐   ┌───────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│ security │──▶│   http    │──▶│  intake   │  │
//!                    │  │rate limit│   │  handlers │   │  service  │  │
//!                    │  └──────────┘   └───────────┘   └─────┬─────┘  │
//!                    │                                       │        │
//!                    │                          ┌────────────┴─────┐  │
//!                    │                          ▼                  ▼  │
//!                    │                    ┌──────────┐     ┌─────────┐│
//!                    │                    │  store   │     │ notify  ││
//!                    │                    │ (MongoDB)│     │ (SMTP)  ││
//!                    │                    └──────────┘     └─────────┘│
//!                    │                                                 │
//!                    │  ┌───────────────────────────────────────────┐ │
//!                    │  │           Cross-Cutting Concerns          │ │
//!                    │  │   config     auth/tokens     tracing      │ │
//!                    │  └───────────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! Both collaborators on the right are optional: a missing database URI or
//! missing SMTP credentials degrade the pipeline to log-only behavior, never
//! to a startup failure.

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::config::loader::load_config;
use portfolio_api::http::HttpServer;
use portfolio_api::notify::Notifier;
use portfolio_api::store::SubmissionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("portfolio-api v0.1.0 starting");

    // Load configuration: optional TOML file, then environment overrides.
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = load_config(config_path.as_deref().map(Path::new))?;

    tracing::info!(
        port = config.server.port,
        environment = %config.server.environment,
        frontend_origin = %config.cors.frontend_origin,
        "Configuration loaded"
    );

    // Acquire long-lived collaborators once at startup; both degrade
    // gracefully when unconfigured.
    let store = SubmissionStore::connect(&config.database).await;
    let notifier = Notifier::from_config(&config.email);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config, store, notifier);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
