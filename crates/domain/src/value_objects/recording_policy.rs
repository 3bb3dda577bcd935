//! Which evaluated submissions are appended to submission history

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy deciding whether an evaluated submission counts toward future
/// rate limiting
///
/// Submissions are always evaluated first and recorded afterwards, so a
/// submission never counts against itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordingPolicy {
    /// Record every evaluated submission, rejected ones included
    #[default]
    AllSubmissions,
    /// Record only approved submissions
    ApprovedOnly,
}

impl RecordingPolicy {
    /// Whether a submission with the given outcome must be recorded
    #[must_use]
    pub const fn should_record(self, approved: bool) -> bool {
        match self {
            Self::AllSubmissions => true,
            Self::ApprovedOnly => approved,
        }
    }
}

impl fmt::Display for RecordingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSubmissions => write!(f, "all_submissions"),
            Self::ApprovedOnly => write!(f, "approved_only"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_records_everything() {
        assert_eq!(RecordingPolicy::default(), RecordingPolicy::AllSubmissions);
        assert!(RecordingPolicy::AllSubmissions.should_record(true));
        assert!(RecordingPolicy::AllSubmissions.should_record(false));
    }

    #[test]
    fn approved_only_skips_rejections() {
        assert!(RecordingPolicy::ApprovedOnly.should_record(true));
        assert!(!RecordingPolicy::ApprovedOnly.should_record(false));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&RecordingPolicy::ApprovedOnly).unwrap();
        assert_eq!(json, "\"approved_only\"");
        let parsed: RecordingPolicy = serde_json::from_str("\"all_submissions\"").unwrap();
        assert_eq!(parsed, RecordingPolicy::AllSubmissions);
    }

    #[test]
    fn display_matches_serde() {
        assert_eq!(RecordingPolicy::ApprovedOnly.to_string(), "approved_only");
    }
}
