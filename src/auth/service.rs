//! Credential check and admin submission queries.

use crate::auth::{token, AuthError};
use crate::config::schema::{AdminConfig, AuthConfig};
use crate::store::{Submission, SubmissionStore};

/// Maximum number of submissions returned to the admin view.
const ADMIN_PAGE_LIMIT: i64 = 100;

/// Verify the configured credential pair and issue a session token.
///
/// Both fields must match exactly; either mismatch yields the same error so
/// the response cannot be used for username enumeration.
pub fn login(
    admin: &AdminConfig,
    auth: &AuthConfig,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    if username != admin.username || password != admin.password {
        return Err(AuthError::InvalidCredentials);
    }

    token::issue(&auth.jwt_secret, auth.token_ttl_hours)
}

/// Result of an admin submission query.
#[derive(Debug)]
pub struct SubmissionPage {
    /// Newest-first submissions, up to the page limit.
    pub submissions: Vec<Submission>,
    /// True when the store was unavailable or unreadable and the page
    /// degraded to empty.
    pub store_offline: bool,
}

/// Fetch the most recent submissions for the admin view.
///
/// The read path degrades like the write path: an unavailable or failing
/// store yields an empty page with the offline flag set, never an error.
pub async fn list_submissions(store: &SubmissionStore) -> SubmissionPage {
    if !store.available() {
        return SubmissionPage {
            submissions: Vec::new(),
            store_offline: true,
        };
    }

    match store.find_recent(ADMIN_PAGE_LIMIT).await {
        Ok(submissions) => SubmissionPage {
            submissions,
            store_offline: false,
        },
        Err(e) => {
            tracing::error!(error = %e, "Submission query failed");
            SubmissionPage {
                submissions: Vec::new(),
                store_offline: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> (AdminConfig, AuthConfig) {
        (AdminConfig::default(), AuthConfig::default())
    }

    #[test]
    fn test_login_success_issues_verifiable_token() {
        let (admin, auth) = configs();
        let token = login(&admin, &auth, "admin", "cyber123").unwrap();
        let claims = token::verify(&token, &auth.jwt_secret).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_login_mismatches_are_indistinguishable() {
        let (admin, auth) = configs();

        let bad_password = login(&admin, &auth, "admin", "wrong").unwrap_err();
        let bad_username = login(&admin, &auth, "wrong", "cyber123").unwrap_err();

        assert!(matches!(bad_password, AuthError::InvalidCredentials));
        assert!(matches!(bad_username, AuthError::InvalidCredentials));
        assert_eq!(bad_password.to_string(), bad_username.to_string());
    }

    #[tokio::test]
    async fn test_list_submissions_degrades_when_store_offline() {
        let store = SubmissionStore::unavailable();
        let page = list_submissions(&store).await;
        assert!(page.submissions.is_empty());
        assert!(page.store_offline);
    }
}
