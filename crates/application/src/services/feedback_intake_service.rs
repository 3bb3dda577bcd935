//! Feedback intake service
//!
//! The in-process caller of the moderation engine: evaluates a submission,
//! then appends it to the submission history according to the configured
//! [`RecordingPolicy`]. Evaluation always happens before recording, so a
//! submission never counts against itself.

use std::{sync::Arc, time::Duration};

use domain::{RecordingPolicy, Submission, Verdict};
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use super::ModerationService;
use crate::{error::ApplicationError, ports::SubmissionHistoryPort};

/// Evaluates and records incoming feedback
#[derive(Clone)]
pub struct FeedbackIntakeService {
    moderation: ModerationService,
    history: Arc<dyn SubmissionHistoryPort>,
    recording_policy: RecordingPolicy,
}

impl std::fmt::Debug for FeedbackIntakeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackIntakeService")
            .field("moderation", &self.moderation)
            .field("recording_policy", &self.recording_policy)
            .finish_non_exhaustive()
    }
}

impl FeedbackIntakeService {
    /// Create an intake service
    pub fn new(
        moderation: ModerationService,
        history: Arc<dyn SubmissionHistoryPort>,
        recording_policy: RecordingPolicy,
    ) -> Self {
        Self {
            moderation,
            history,
            recording_policy,
        }
    }

    /// The moderation engine behind this service
    #[must_use]
    pub const fn moderation(&self) -> &ModerationService {
        &self.moderation
    }

    /// The active recording policy
    #[must_use]
    pub const fn recording_policy(&self) -> RecordingPolicy {
        self.recording_policy
    }

    /// Evaluate a submission and record it per policy
    ///
    /// The evaluation is anchored at the submission's ingestion time. With a
    /// `timeout`, the store query is bounded by it. A failed evaluation is
    /// never recorded; a failed record write is returned as a store error.
    #[instrument(skip(self, submission), fields(identity = %submission.identity, policy = %self.recording_policy))]
    pub async fn submit(
        &self,
        submission: &Submission,
        timeout: Option<Duration>,
    ) -> Result<Verdict, ApplicationError> {
        let now = submission.received_at;
        let verdict = match timeout {
            Some(timeout) => {
                self.moderation
                    .evaluate_within(submission, now, Instant::now() + timeout)
                    .await
            },
            None => self.moderation.evaluate(submission, now).await,
        }
        .inspect_err(|e| warn!(error = %e, "Evaluation failed"))?;

        if self.recording_policy.should_record(verdict.approved()) {
            self.history
                .record(&submission.to_record())
                .await
                .inspect_err(|e| warn!(error = %e, "Failed to record submission"))?;
        }

        info!(
            approved = verdict.approved(),
            reason = verdict.reason_kind().label(),
            "Feedback moderated"
        );
        Ok(verdict)
    }

    /// Whether the submission history is reachable
    pub async fn is_history_available(&self) -> bool {
        self.history.is_available().await
    }
}
