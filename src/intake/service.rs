//! Intake pipeline orchestration.
//!
//! # Responsibilities
//! - Run the pipeline for one submission: validate → persist → notify
//! - Short-circuit on validation failure before any I/O
//! - Treat persistence and notification as best-effort side effects:
//!   their faults are logged and never fail the caller-visible contract
//!
//! # Design Decisions
//! - Within a call the steps run strictly in sequence; across concurrent
//!   calls no ordering is guaranteed beyond the store's own insertion order

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::intake::validator::{validate, ValidationError};
use crate::notify::{DispatchStatus, Notifier};
use crate::store::{Submission, SubmissionStore};

/// Raw contact-form fields as received on the wire. All fields are optional
/// so that absent JSON keys reach the validator as missing rather than
/// failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Result of a successful intake call.
#[derive(Debug, Clone, Copy)]
pub struct IntakeOutcome {
    /// Whether an email notification was actually sent. `false` covers both
    /// an unconfigured notifier (accepted but not sent) and a send failure.
    pub email_sent: bool,
}

/// Orchestrates one contact submission through validation, optional
/// persistence, and optional notification.
pub struct IntakeService {
    store: Arc<SubmissionStore>,
    notifier: Arc<Notifier>,
}

impl IntakeService {
    pub fn new(store: Arc<SubmissionStore>, notifier: Arc<Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Submit one contact-form entry.
    ///
    /// Validation failures return immediately without touching the store or
    /// the notifier. Store and notifier faults are logged and downgraded;
    /// the call succeeds whenever the fields validate.
    pub async fn submit(
        &self,
        raw: RawSubmission,
        source_address: Option<String>,
    ) -> Result<IntakeOutcome, ValidationError> {
        let fields = validate(
            raw.name.as_deref().unwrap_or(""),
            raw.email.as_deref().unwrap_or(""),
            raw.message.as_deref().unwrap_or(""),
        )?;

        let submitted_at = Utc::now();
        let submission = Submission {
            id: None,
            name: fields.name.clone(),
            email: fields.email.clone(),
            message: fields.message.clone(),
            submitted_at,
            source_address,
        };

        // Persistence is an audit side effect, not a correctness gate.
        if self.store.available() {
            match self.store.insert(&submission).await {
                Ok(Some(id)) => tracing::info!(id = %id, "Contact saved to database"),
                Ok(None) => tracing::info!("Contact saved to database"),
                Err(e) => {
                    tracing::error!(error = %e, "Contact persistence failed, continuing")
                }
            }
        }

        let status = self.notifier.dispatch(&fields, submitted_at).await;

        Ok(IntakeOutcome {
            email_sent: matches!(status, DispatchStatus::Sent),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EmailConfig;

    fn degraded_service() -> IntakeService {
        IntakeService::new(
            Arc::new(SubmissionStore::unavailable()),
            Arc::new(Notifier::from_config(&EmailConfig::default())),
        )
    }

    fn raw(name: &str, email: &str, message: &str) -> RawSubmission {
        RawSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_succeeds_without_store_or_notifier() {
        let service = degraded_service();
        let outcome = service
            .submit(raw("Ada", "ada@example.com", "hi"), Some("127.0.0.1".into()))
            .await
            .unwrap();
        assert!(!outcome.email_sent);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_fields_before_io() {
        let service = degraded_service();
        let err = service
            .submit(raw("Ada", "not-an-email", "hi"), None)
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
    }

    #[tokio::test]
    async fn test_submit_treats_absent_fields_as_missing() {
        let service = degraded_service();
        let err = service.submit(RawSubmission::default(), None).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingField);
    }
}
