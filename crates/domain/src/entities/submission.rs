//! Submissions under evaluation and their history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::SubmitterId;

/// A feedback submission as seen by the moderation core
///
/// Only the identity and the message are inspected. The timestamp is
/// assigned once at ingestion and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Who submitted (rate-limit key)
    pub identity: SubmitterId,
    /// Free-text feedback message (content-filter input)
    pub message: String,
    /// Ingestion time
    pub received_at: DateTime<Utc>,
}

impl Submission {
    /// Create a submission stamped with the given ingestion time
    pub fn new(
        identity: impl Into<SubmitterId>,
        message: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: identity.into(),
            message: message.into(),
            received_at,
        }
    }

    /// Create a submission stamped with the current time
    pub fn received_now(identity: impl Into<SubmitterId>, message: impl Into<String>) -> Self {
        Self::new(identity, message, Utc::now())
    }

    /// The history record this submission produces when recorded
    #[must_use]
    pub fn to_record(&self) -> SubmissionRecord {
        SubmissionRecord {
            identity: self.identity.clone(),
            timestamp: self.received_at,
        }
    }
}

/// One entry of the append-only submission history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Submitter identity
    pub identity: SubmitterId,
    /// When the submission was received
    pub timestamp: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Create a record
    pub fn new(identity: impl Into<SubmitterId>, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity: identity.into(),
            timestamp,
        }
    }
}
