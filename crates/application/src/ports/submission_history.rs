//! Submission history port
//!
//! Defines the interface to the append-only record of prior submissions
//! used for rate limiting. The moderation engine only ever counts; recording
//! is done by the caller after a verdict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{SubmissionRecord, SubmitterId};
#[cfg(test)]
use mockall::automock;

use crate::error::StoreError;

/// Port for the submission history event store
///
/// Records are never mutated or deleted through this port; retention is the
/// store operator's concern.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubmissionHistoryPort: Send + Sync {
    /// Count records for `identity` with `timestamp >= threshold`
    ///
    /// Must return an error rather than an undercount when the query cannot
    /// complete.
    async fn count_since(
        &self,
        identity: &SubmitterId,
        threshold: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    /// Append a record
    async fn record(&self, record: &SubmissionRecord) -> Result<(), StoreError>;

    /// Check if the store is reachable and answering queries
    async fn is_available(&self) -> bool;
}
