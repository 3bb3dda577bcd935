//! Moderation verdicts
//!
//! The reason strings are client-facing and matched on by callers, so they
//! are fixed here and nowhere else.
//!
//! # Examples
//!
//! ```
//! use domain::{Verdict, VerdictReason};
//!
//! let verdict = Verdict::approve();
//! assert!(verdict.approved());
//! assert_eq!(verdict.reason(), "Feedback approved.");
//!
//! let rejected = Verdict::from(VerdictReason::InappropriateLanguage);
//! assert!(!rejected.approved());
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

const APPROVED_MESSAGE: &str = "Feedback approved.";
const TOO_MANY_SUBMISSIONS_MESSAGE: &str =
    "Too many submissions in a short time period. Please try again later.";
const INAPPROPRIATE_LANGUAGE_MESSAGE: &str =
    "Inappropriate language detected in the feedback message.";

/// Why a verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictReason {
    /// Passed every check
    Approved,
    /// Submitter exceeded the sliding-window threshold
    TooManySubmissions,
    /// Message contains a denylisted term
    InappropriateLanguage,
}

impl VerdictReason {
    /// The stable, client-facing reason text
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Approved => APPROVED_MESSAGE,
            Self::TooManySubmissions => TOO_MANY_SUBMISSIONS_MESSAGE,
            Self::InappropriateLanguage => INAPPROPRIATE_LANGUAGE_MESSAGE,
        }
    }

    /// Whether this reason means the submission is accepted
    #[must_use]
    pub const fn is_approval(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Short machine-friendly label, used in logs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::TooManySubmissions => "too_many_submissions",
            Self::InappropriateLanguage => "inappropriate_language",
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl TryFrom<&str> for VerdictReason {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            APPROVED_MESSAGE => Ok(Self::Approved),
            TOO_MANY_SUBMISSIONS_MESSAGE => Ok(Self::TooManySubmissions),
            INAPPROPRIATE_LANGUAGE_MESSAGE => Ok(Self::InappropriateLanguage),
            other => Err(DomainError::ValidationError(format!(
                "unknown verdict reason: {other}"
            ))),
        }
    }
}

impl Serialize for VerdictReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

impl<'de> Deserialize<'de> for VerdictReason {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::try_from(raw.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Outcome of a single moderation evaluation
///
/// `approved` is derived from the reason, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VerdictWire", into = "VerdictWire")]
pub struct Verdict {
    reason: VerdictReason,
}

impl Verdict {
    /// Approve the submission
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            reason: VerdictReason::Approved,
        }
    }

    /// Reject because the submitter is over the rate limit
    #[must_use]
    pub const fn too_many_submissions() -> Self {
        Self {
            reason: VerdictReason::TooManySubmissions,
        }
    }

    /// Reject because the message contains a denylisted term
    #[must_use]
    pub const fn inappropriate_language() -> Self {
        Self {
            reason: VerdictReason::InappropriateLanguage,
        }
    }

    /// Whether the submission is accepted
    #[must_use]
    pub const fn approved(&self) -> bool {
        self.reason.is_approval()
    }

    /// The client-facing reason text
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason.message()
    }

    /// The structured reason
    #[must_use]
    pub const fn reason_kind(&self) -> VerdictReason {
        self.reason
    }
}

impl From<VerdictReason> for Verdict {
    fn from(reason: VerdictReason) -> Self {
        Self { reason }
    }
}

/// Wire shape `{ "approved": bool, "reason": string }`
#[derive(Serialize, Deserialize)]
struct VerdictWire {
    approved: bool,
    reason: VerdictReason,
}

impl From<Verdict> for VerdictWire {
    fn from(verdict: Verdict) -> Self {
        Self {
            approved: verdict.approved(),
            reason: verdict.reason,
        }
    }
}

impl TryFrom<VerdictWire> for Verdict {
    type Error = DomainError;

    fn try_from(wire: VerdictWire) -> Result<Self, Self::Error> {
        if wire.approved != wire.reason.is_approval() {
            return Err(DomainError::ValidationError(format!(
                "approved={} contradicts reason '{}'",
                wire.approved, wire.reason
            )));
        }
        Ok(Self::from(wire.reason))
    }
}
