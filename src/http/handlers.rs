//! Request handlers for the API routes.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::service as auth_service;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::intake::service::RawSubmission;

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Portfolio API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.server.environment,
    }))
}

/// `POST /api/contact`
///
/// Runs the intake pipeline. Validation failures map to 400; a degraded
/// store or notifier still yields a 200 with `emailSent` reflecting what
/// actually happened. Body rejections (malformed JSON, wrong content type,
/// oversized payload) are taken as a `Result` so they get the standard
/// failure envelope instead of the extractor's plain-text response.
pub async fn submit_contact(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(raw) = body?;
    let outcome = state
        .intake
        .submit(raw, Some(addr.ip().to_string()))
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Message sent successfully! I'll get back to you soon.",
        "emailSent": outcome.email_sent,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// `POST /api/admin/login`
pub async fn admin_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let token = auth_service::login(
        &state.config.admin,
        &state.config.auth,
        body.username.as_deref().unwrap_or(""),
        body.password.as_deref().unwrap_or(""),
    )?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
    })))
}

/// `GET /api/admin/contacts`
///
/// Runs behind the admin middleware. An offline store degrades to an empty
/// page with a note, not an error.
pub async fn list_contacts(State(state): State<AppState>) -> Json<Value> {
    let page = auth_service::list_submissions(&state.store).await;
    let total = page.submissions.len();

    let mut body = json!({
        "success": true,
        "contacts": page.submissions,
        "total": total,
    });
    if page.store_offline {
        body["message"] = json!("Database not connected");
    }

    Json(body)
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
