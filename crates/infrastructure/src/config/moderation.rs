//! Moderation policy and denylist configuration.

use std::time::Duration;

use application::EmptyDenylist;
use domain::{
    DEFAULT_MAX_SUBMISSIONS, DEFAULT_WINDOW_SECS, DomainError, RecordingPolicy, ThresholdPolicy,
};
use serde::{Deserialize, Serialize};

/// Moderation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Length of the trailing rate-limit window in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Submissions within the window at which an identity counts as spam
    #[serde(default = "default_max_submissions")]
    pub max_submissions: u32,

    /// Upper bound on a single evaluation, in milliseconds
    #[serde(default = "default_evaluation_timeout_ms")]
    pub evaluation_timeout_ms: u64,

    /// Which evaluated submissions are appended to the history
    #[serde(default)]
    pub recording_policy: RecordingPolicy,

    /// Denylist source
    #[serde(default)]
    pub denylist: DenylistConfig,
}

const fn default_window_secs() -> u64 {
    DEFAULT_WINDOW_SECS
}

const fn default_max_submissions() -> u32 {
    DEFAULT_MAX_SUBMISSIONS
}

const fn default_evaluation_timeout_ms() -> u64 {
    5_000
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_submissions: default_max_submissions(),
            evaluation_timeout_ms: default_evaluation_timeout_ms(),
            recording_policy: RecordingPolicy::default(),
            denylist: DenylistConfig::default(),
        }
    }
}

impl ModerationConfig {
    /// Build the threshold policy
    pub fn threshold_policy(&self) -> Result<ThresholdPolicy, DomainError> {
        ThresholdPolicy::from_secs(self.window_secs, self.max_submissions)
    }

    /// Evaluation timeout as a [`Duration`]
    #[must_use]
    pub const fn evaluation_timeout(&self) -> Duration {
        Duration::from_millis(self.evaluation_timeout_ms)
    }
}

/// Denylist source configuration
///
/// Precedence: `url`, then non-empty `terms`, then `path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenylistConfig {
    /// Local newline-delimited file
    #[serde(default = "default_denylist_path")]
    pub path: String,

    /// Remote plain-text list
    #[serde(default)]
    pub url: Option<String>,

    /// Terms given inline
    #[serde(default)]
    pub terms: Vec<String>,

    /// Accept a denylist with zero terms
    #[serde(default)]
    pub allow_empty: bool,

    /// Timeout for fetching a remote list, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_denylist_path() -> String {
    "bw.txt".to_string()
}

const fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for DenylistConfig {
    fn default() -> Self {
        Self {
            path: default_denylist_path(),
            url: None,
            terms: Vec::new(),
            allow_empty: false,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl DenylistConfig {
    /// How an empty load is treated
    #[must_use]
    pub const fn empty_policy(&self) -> EmptyDenylist {
        if self.allow_empty {
            EmptyDenylist::Allow
        } else {
            EmptyDenylist::Reject
        }
    }
}
