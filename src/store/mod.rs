//! Submission store: the optional MongoDB persistence collaborator.
//!
//! # Responsibilities
//! - Hold the long-lived database connection acquired once at startup
//! - Persist submissions and read back the most recent ones
//! - Degrade to an explicit "unavailable" state when no URI is configured
//!   or the client cannot be built; never a startup failure
//!
//! # Design Decisions
//! - Availability is an explicit query (`available()`), not a nullable
//!   global; callers branch on capability, not connection internals
//! - Every operation runs under a bounded timeout so a wedged database
//!   cannot stall a request beyond a known ceiling
//! - The legacy `admins` collection still exists in deployed databases but
//!   is vestigial: authentication checks configuration values only

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;

use crate::config::schema::DatabaseConfig;

/// Name of the collection holding contact submissions.
const CONTACTS_COLLECTION: &str = "contacts";

/// One persisted contact-form entry. Field names on the wire match the
/// original collection layout (`submittedAt`, `sourceAddress`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Store-assigned identity; `None` until (and unless) persisted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    pub email: String,
    pub message: String,

    /// Set at creation time, never mutated.
    pub submitted_at: DateTime<Utc>,

    /// Network origin of the request, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
}

/// Store operation failure. Callers downgrade these to logged, best-effort
/// behavior; they never surface to API clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database not connected")]
    Unavailable,

    #[error("database operation timed out")]
    Timeout,

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Optional persistence collaborator for submissions.
pub struct SubmissionStore {
    collection: Option<Collection<Submission>>,
    op_timeout: Duration,
}

impl SubmissionStore {
    /// Build the store from configuration.
    ///
    /// A missing URI or a client-construction error yields an unavailable
    /// store with a warning; the server keeps running without persistence.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let op_timeout = Duration::from_secs(config.op_timeout_secs);

        let Some(uri) = config.uri.as_deref() else {
            tracing::warn!("MongoDB URI not provided, running without database");
            return Self::unavailable();
        };

        match Client::with_uri_str(uri).await {
            Ok(client) => {
                tracing::info!(database = %config.name, "MongoDB client initialized");
                Self {
                    collection: Some(
                        client
                            .database(&config.name)
                            .collection(CONTACTS_COLLECTION),
                    ),
                    op_timeout,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "MongoDB connection failed, running without database");
                Self::unavailable()
            }
        }
    }

    /// A store with no backing database.
    pub fn unavailable() -> Self {
        Self {
            collection: None,
            op_timeout: Duration::from_secs(DatabaseConfig::default().op_timeout_secs),
        }
    }

    /// Whether a live collection handle exists.
    pub fn available(&self) -> bool {
        self.collection.is_some()
    }

    /// Persist one submission, returning the store-assigned identity.
    pub async fn insert(&self, submission: &Submission) -> Result<Option<ObjectId>, StoreError> {
        let Some(collection) = &self.collection else {
            return Err(StoreError::Unavailable);
        };

        let result = timeout(self.op_timeout, collection.insert_one(submission))
            .await
            .map_err(|_| StoreError::Timeout)??;

        Ok(result.inserted_id.as_object_id())
    }

    /// Fetch up to `limit` submissions, newest first by `submittedAt`.
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<Submission>, StoreError> {
        let Some(collection) = &self.collection else {
            return Err(StoreError::Unavailable);
        };

        let find = collection
            .find(doc! {})
            .sort(doc! { "submittedAt": -1 })
            .limit(limit);

        let cursor = timeout(self.op_timeout, find)
            .await
            .map_err(|_| StoreError::Timeout)??;

        let submissions = timeout(self.op_timeout, cursor.try_collect::<Vec<_>>())
            .await
            .map_err(|_| StoreError::Timeout)??;

        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_store_reports_unavailable() {
        let store = SubmissionStore::unavailable();
        assert!(!store.available());
    }

    #[tokio::test]
    async fn test_unavailable_store_rejects_operations() {
        let store = SubmissionStore::unavailable();

        let submission = Submission {
            id: None,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hi".into(),
            submitted_at: Utc::now(),
            source_address: None,
        };

        assert!(matches!(
            store.insert(&submission).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            store.find_recent(100).await,
            Err(StoreError::Unavailable)
        ));
    }

    #[test]
    fn test_submission_wire_format() {
        let submission = Submission {
            id: None,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hi".into(),
            submitted_at: Utc::now(),
            source_address: Some("127.0.0.1".into()),
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert!(value.get("submittedAt").is_some());
        assert_eq!(value["sourceAddress"], "127.0.0.1");
        // Unpersisted submissions carry no identity on the wire.
        assert!(value.get("_id").is_none());
    }
}
