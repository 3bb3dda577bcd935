//! Moderation engine
//!
//! Produces exactly one verdict per submission, in a fixed short-circuiting
//! order: spam check first, then the content filter. Evaluation never
//! writes to the submission history.

use chrono::{DateTime, Utc};
use domain::{Submission, Verdict};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, instrument, warn};

use super::{ContentFilter, SpamDetector};
use crate::error::{EvaluationError, StoreError};

/// Decides whether a feedback submission is approved
#[derive(Debug, Clone)]
pub struct ModerationService {
    spam_detector: SpamDetector,
    content_filter: ContentFilter,
}

impl ModerationService {
    /// Create a moderation service
    #[must_use]
    pub const fn new(spam_detector: SpamDetector, content_filter: ContentFilter) -> Self {
        Self {
            spam_detector,
            content_filter,
        }
    }

    /// The spam detector in use
    #[must_use]
    pub const fn spam_detector(&self) -> &SpamDetector {
        &self.spam_detector
    }

    /// The content filter in use
    #[must_use]
    pub const fn content_filter(&self) -> &ContentFilter {
        &self.content_filter
    }

    /// Evaluate a submission at `now`
    ///
    /// A store failure yields an [`EvaluationError`], never a verdict.
    #[instrument(skip(self, submission), fields(identity = %submission.identity))]
    pub async fn evaluate(
        &self,
        submission: &Submission,
        now: DateTime<Utc>,
    ) -> Result<Verdict, EvaluationError> {
        if self.spam_detector.is_spam(&submission.identity, now).await? {
            debug!("Rejected as spam");
            return Ok(Verdict::too_many_submissions());
        }

        if self.content_filter.is_inappropriate(&submission.message) {
            debug!("Rejected for inappropriate language");
            return Ok(Verdict::inappropriate_language());
        }

        Ok(Verdict::approve())
    }

    /// Evaluate a submission, giving up at `deadline`
    ///
    /// Expiry yields an [`EvaluationError`] wrapping [`StoreError::Timeout`].
    /// The in-flight store query is dropped with the evaluation future.
    pub async fn evaluate_within(
        &self,
        submission: &Submission,
        now: DateTime<Utc>,
        deadline: Instant,
    ) -> Result<Verdict, EvaluationError> {
        let budget = deadline.saturating_duration_since(Instant::now());

        match timeout_at(deadline, self.evaluate(submission, now)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    identity = %submission.identity,
                    budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
                    "Evaluation deadline expired"
                );
                Err(StoreError::Timeout(budget).into())
            },
        }
    }
}
