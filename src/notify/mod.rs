//! Notifier: the optional outbound-email collaborator.
//!
//! # Responsibilities
//! - Decide for itself whether it is configured (host + user + password)
//! - Render a submission into an email and send it over SMTP
//! - Report "accepted but not sent" distinctly from a send failure
//!
//! # Design Decisions
//! - An unconfigured notifier logs the submission instead of sending and
//!   reports `Skipped`; this keeps intake usable on bare deployments
//! - Sends run under a bounded timeout; a timed-out or failed send reports
//!   `Failed` and never propagates out of the dispatch call

use std::time::Duration;

use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::time::timeout;

use crate::config::schema::EmailConfig;
use crate::intake::validator::NormalizedFields;

/// Outcome of one notification dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The email was handed to the SMTP relay.
    Sent,
    /// The notifier is not configured; the submission was logged instead.
    Skipped,
    /// The send failed or timed out; the failure was logged.
    Failed,
}

#[derive(Debug, Error)]
enum ComposeError {
    #[error("no from/to address available")]
    MissingAddress,

    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("message build failed: {0}")]
    Build(#[from] lettre::error::Error),
}

/// Optional outbound-email collaborator.
pub struct Notifier {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<String>,
    to: Option<String>,
    send_timeout: Duration,
}

impl Notifier {
    /// Build the notifier from configuration.
    ///
    /// Missing credentials or a transport-setup error leave the notifier
    /// unconfigured; intake still succeeds, with `email_sent: false`.
    pub fn from_config(config: &EmailConfig) -> Self {
        let send_timeout = Duration::from_secs(config.send_timeout_secs);
        let from = config.from.clone().or_else(|| config.user.clone());
        let to = config.to.clone().or_else(|| config.user.clone());

        let (Some(host), Some(user), Some(password)) =
            (&config.host, &config.user, &config.password)
        else {
            return Self {
                transport: None,
                from,
                to,
                send_timeout,
            };
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
            Ok(builder) => Some(
                builder
                    .port(config.port)
                    .credentials(Credentials::new(user.clone(), password.clone()))
                    .build(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "SMTP transport setup failed, email disabled");
                None
            }
        };

        Self {
            transport,
            from,
            to,
            send_timeout,
        }
    }

    /// Whether outbound credentials are present and the transport is ready.
    pub fn configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Send one submission notification.
    pub async fn dispatch(
        &self,
        fields: &NormalizedFields,
        submitted_at: DateTime<Utc>,
    ) -> DispatchStatus {
        let Some(transport) = &self.transport else {
            tracing::info!(
                name = %fields.name,
                email = %fields.email,
                "Email not configured, logging contact form data"
            );
            return DispatchStatus::Skipped;
        };

        let message = match self.compose(fields, submitted_at) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Email composition failed");
                return DispatchStatus::Failed;
            }
        };

        match timeout(self.send_timeout, transport.send(message)).await {
            Ok(Ok(_)) => {
                tracing::info!(email = %fields.email, "Notification email sent");
                DispatchStatus::Sent
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Email sending failed");
                DispatchStatus::Failed
            }
            Err(_) => {
                tracing::error!("Email sending timed out");
                DispatchStatus::Failed
            }
        }
    }

    fn compose(
        &self,
        fields: &NormalizedFields,
        submitted_at: DateTime<Utc>,
    ) -> Result<Message, ComposeError> {
        let from: Mailbox = self
            .from
            .as_deref()
            .ok_or(ComposeError::MissingAddress)?
            .parse()?;
        let to: Mailbox = self
            .to
            .as_deref()
            .ok_or(ComposeError::MissingAddress)?
            .parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(format!("New Contact Form Submission from {}", fields.name))
            .header(ContentType::TEXT_HTML)
            .body(render_body(fields, submitted_at))?;

        Ok(message)
    }
}

fn render_body(fields: &NormalizedFields, submitted_at: DateTime<Utc>) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h2>New Portfolio Contact</h2>\
           <p><strong>Name:</strong> {}</p>\
           <p><strong>Email:</strong> {}</p>\
           <p><strong>Message:</strong></p>\
           <div style=\"padding: 15px; border-left: 4px solid #00ff88;\">{}</div>\
           <p style=\"color: #888; font-size: 12px;\">Submitted at: {}</p>\
         </div>",
        fields.name,
        fields.email,
        fields.message.replace('\n', "<br>"),
        submitted_at.to_rfc3339(),
    )
}
