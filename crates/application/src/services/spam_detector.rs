//! Spam detector
//!
//! Rate limiting over a trailing window anchored at the injected `now`.
//! A store failure is propagated, never read as "not spam".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{SubmitterId, ThresholdPolicy};
use tracing::{debug, instrument};

use crate::{error::StoreError, ports::SubmissionHistoryPort};

/// Decides whether an identity has submitted too often
#[derive(Clone)]
pub struct SpamDetector {
    history: Arc<dyn SubmissionHistoryPort>,
    policy: ThresholdPolicy,
}

impl std::fmt::Debug for SpamDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpamDetector")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SpamDetector {
    /// Create a detector over a history store
    pub fn new(history: Arc<dyn SubmissionHistoryPort>, policy: ThresholdPolicy) -> Self {
        Self { history, policy }
    }

    /// The active threshold policy
    #[must_use]
    pub const fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    /// Whether `identity` has at least `max_submissions` records at or after
    /// `now - window`
    #[instrument(skip(self), fields(identity = %identity))]
    pub async fn is_spam(
        &self,
        identity: &SubmitterId,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let threshold = self.policy.window_start(now);
        let count = self.history.count_since(identity, threshold).await?;
        let spam = self.policy.is_exceeded(count);

        debug!(
            count,
            max = self.policy.max_submissions(),
            spam,
            "Counted recent submissions"
        );
        Ok(spam)
    }
}
