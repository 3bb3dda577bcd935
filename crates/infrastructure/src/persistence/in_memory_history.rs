//! In-process submission history
//!
//! Keeps records in a map keyed by identity. History does not survive a
//! restart.

use std::collections::HashMap;

use application::{StoreError, ports::SubmissionHistoryPort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{SubmissionRecord, SubmitterId};
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Submission history held in memory
#[derive(Debug, Default)]
pub struct InMemorySubmissionHistory {
    records: RwLock<HashMap<SubmitterId, Vec<DateTime<Utc>>>>,
}

impl InMemorySubmissionHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all identities
    pub fn len(&self) -> usize {
        self.records.read().values().map(Vec::len).sum()
    }

    /// Whether no record has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionHistoryPort for InMemorySubmissionHistory {
    #[instrument(skip(self), fields(identity = %identity))]
    async fn count_since(
        &self,
        identity: &SubmitterId,
        threshold: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let count = self
            .records
            .read()
            .get(identity)
            .map_or(0, |timestamps| {
                timestamps.iter().filter(|&&t| t >= threshold).count()
            });

        debug!(count, "Counted submissions since threshold");
        Ok(count as u64)
    }

    async fn record(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .entry(record.identity.clone())
            .or_default()
            .push(record.timestamp);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}
