//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, CORS, security
//!   headers, rate limits)
//! - Serve requests with graceful shutdown
//!
//! # Middleware order
//! Rate limits sit inside CORS and the security headers so every response,
//! including a 429, still carries them; both limiters run before any handler
//! and therefore before validation, store, or notifier work.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::require_admin;
use crate::config::schema::{AppConfig, CorsConfig};
use crate::http::handlers;
use crate::http::response::ApiError;
use crate::intake::service::IntakeService;
use crate::notify::Notifier;
use crate::security::headers::security_headers;
use crate::security::rate_limit::{rate_limit_middleware, SlidingWindowLimiter};
use crate::store::SubmissionStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<SubmissionStore>,
    pub intake: Arc<IntakeService>,
}

/// HTTP server for the contact intake API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// collaborators.
    pub fn new(config: AppConfig, store: SubmissionStore, notifier: Notifier) -> Self {
        let store = Arc::new(store);
        let intake = Arc::new(IntakeService::new(store.clone(), Arc::new(notifier)));

        let state = AppState {
            config: Arc::new(config),
            store,
            intake,
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        let global_limiter = Arc::new(SlidingWindowLimiter::new(
            config.rate_limit.global_max_requests,
            Duration::from_secs(config.rate_limit.global_window_secs),
        ));
        let contact_limiter = Arc::new(SlidingWindowLimiter::new(
            config.rate_limit.contact_max_requests,
            Duration::from_secs(config.rate_limit.contact_window_secs),
        ));

        let contact_routes = Router::new()
            .route("/api/contact", post(handlers::submit_contact))
            .route_layer(middleware::from_fn_with_state(
                contact_limiter,
                rate_limit_middleware,
            ));

        let admin_routes = Router::new()
            .route("/api/admin/contacts", get(handlers::list_contacts))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_admin,
            ));

        Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/admin/login", post(handlers::admin_login))
            .merge(contact_routes)
            .merge(admin_routes)
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware::from_fn_with_state(
                global_limiter,
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn(security_headers))
            .layer(cors_layer(&config.cors))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// CORS restricted to the single configured frontend origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Top-level fallback for panicking handlers: a generic 500 envelope with no
/// internal detail.
fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    ApiError::Internal.into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
