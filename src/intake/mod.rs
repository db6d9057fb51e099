//! Contact submission intake subsystem.
//!
//! # Responsibilities
//! - Validate and normalize raw form fields (pure, no I/O)
//! - Orchestrate the intake pipeline: validate → persist → notify
//! - Downgrade store and notifier faults to best-effort behavior

pub mod service;
pub mod validator;

pub use service::{IntakeOutcome, IntakeService, RawSubmission};
pub use validator::{validate, NormalizedFields, ValidationError};
