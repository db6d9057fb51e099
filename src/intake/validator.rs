//! Contact-form field validation.
//!
//! # Responsibilities
//! - Reject missing, oversized, or malformed fields
//! - Normalize fields (trim whitespace, lower-case the email)
//!
//! # Design Decisions
//! - Pure function: no I/O, no clock, no shared state
//! - Check order is fixed for deterministic error reporting:
//!   presence → name length → message length → email format
//! - Normalization is idempotent: validating already-normalized fields
//!   returns them unchanged

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Maximum accepted name length after trimming.
const MAX_NAME_LEN: usize = 100;

/// Maximum accepted message length after trimming.
const MAX_MESSAGE_LEN: usize = 1000;

/// Accepted email shape: word characters optionally segmented by single
/// `.`/`-`, an `@`, a similarly-segmented domain, and one or more 2-3
/// character TLD labels. `(?-u)` keeps `\w` ASCII-only, matching the
/// behavior the site's clients were built against.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("email pattern must compile")
});

/// Structured validation failure. The display strings are the user-facing
/// messages returned by the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Name must be less than 100 characters")]
    NameTooLong,

    #[error("Message must be less than 1000 characters")]
    MessageTooLong,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Normalized contact fields: trimmed, with the email lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validate and normalize raw contact-form fields.
pub fn validate(name: &str, email: &str, message: &str) -> Result<NormalizedFields, ValidationError> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ValidationError::MissingField);
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong);
    }

    let email = email.to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(NormalizedFields {
        name: name.to_string(),
        email,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let fields = validate("Ada Lovelace", "ada@example.com", "Hello there").unwrap();
        assert_eq!(fields.name, "Ada Lovelace");
        assert_eq!(fields.email, "ada@example.com");
        assert_eq!(fields.message, "Hello there");
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate("", "a@b.com", "hi"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate("Ada", "", "hi"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate("Ada", "a@b.com", ""),
            Err(ValidationError::MissingField)
        );
        // Whitespace-only counts as missing.
        assert_eq!(
            validate("   ", "a@b.com", "hi"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate("Ada", "a@b.com", " \t\n "),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn test_name_too_long() {
        let name = "x".repeat(101);
        assert_eq!(
            validate(&name, "a@b.com", "hi"),
            Err(ValidationError::NameTooLong)
        );
        // Checked before email format: a long name wins even with a bad email.
        assert_eq!(
            validate(&name, "not-an-email", "hi"),
            Err(ValidationError::NameTooLong)
        );
        // Exactly 100 characters is fine.
        assert!(validate(&"x".repeat(100), "a@b.com", "hi").is_ok());
    }

    #[test]
    fn test_message_too_long() {
        let message = "y".repeat(1001);
        assert_eq!(
            validate("Ada", "a@b.com", &message),
            Err(ValidationError::MessageTooLong)
        );
        assert!(validate("Ada", "a@b.com", &"y".repeat(1000)).is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["not-an-email", "a@b", "@missing-local.com", "a@b.", "a b@c.de"] {
            assert_eq!(
                validate("Ada", email, "hi"),
                Err(ValidationError::InvalidEmail),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_non_ascii_email_rejected() {
        assert_eq!(
            validate("Ada", "täst@täst.com", "hi"),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_email_normalized_to_lowercase() {
        let fields = validate("Ada", "User@Example.COM", "hi").unwrap();
        assert_eq!(fields.email, "user@example.com");
    }

    #[test]
    fn test_multi_part_tld_accepted() {
        assert!(validate("Ada", "user@example.co.uk", "hi").is_ok());
    }

    #[test]
    fn test_fields_trimmed() {
        let fields = validate("  Ada  ", " ada@example.com ", "  hi  ").unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.email, "ada@example.com");
        assert_eq!(fields.message, "hi");
    }

    #[test]
    fn test_normalization_idempotent() {
        let first = validate("  Ada ", " User@Example.COM", "hi there ").unwrap();
        let second = validate(&first.name, &first.email, &first.message).unwrap();
        assert_eq!(first, second);
    }
}
