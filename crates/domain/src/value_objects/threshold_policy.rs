//! Sliding-window rate limit policy
//!
//! A submitter is considered a spammer once they have `max_submissions`
//! recorded submissions inside the trailing window `[now - window, now]`.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use domain::ThresholdPolicy;
//!
//! let policy = ThresholdPolicy::default();
//! assert_eq!(policy.window(), Duration::from_secs(300));
//! assert_eq!(policy.max_submissions(), 5);
//!
//! assert!(!policy.is_exceeded(4));
//! assert!(policy.is_exceeded(5));
//!
//! // Zero thresholds are rejected
//! assert!(ThresholdPolicy::new(Duration::ZERO, 5).is_err());
//! assert!(ThresholdPolicy::new(Duration::from_secs(60), 0).is_err());
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::errors::DomainError;

/// Default window length (5 minutes)
pub const DEFAULT_WINDOW_SECS: u64 = 300;

/// Default number of submissions allowed per window
pub const DEFAULT_MAX_SUBMISSIONS: u32 = 5;

/// Threshold policy for spam detection
///
/// Invariants: `max_submissions >= 1` and `window > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    window: Duration,
    window_delta: TimeDelta,
    max_submissions: u32,
}

impl ThresholdPolicy {
    /// Create a policy, enforcing its invariants
    pub fn new(window: Duration, max_submissions: u32) -> Result<Self, DomainError> {
        if window.is_zero() {
            return Err(DomainError::InvalidThresholdPolicy(
                "window must be greater than zero".to_string(),
            ));
        }
        if max_submissions == 0 {
            return Err(DomainError::InvalidThresholdPolicy(
                "max_submissions must be at least 1".to_string(),
            ));
        }
        let window_delta = TimeDelta::from_std(window).map_err(|_| {
            DomainError::InvalidThresholdPolicy(format!("window {window:?} is out of range"))
        })?;

        Ok(Self {
            window,
            window_delta,
            max_submissions,
        })
    }

    /// Create a policy from a window in seconds
    pub fn from_secs(window_secs: u64, max_submissions: u32) -> Result<Self, DomainError> {
        Self::new(Duration::from_secs(window_secs), max_submissions)
    }

    /// Length of the trailing window
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Number of submissions within the window at which a submitter is a spammer
    #[must_use]
    pub const fn max_submissions(&self) -> u32 {
        self.max_submissions
    }

    /// Inclusive lower bound of the window anchored at `now`
    #[must_use]
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.window_delta)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether `count` submissions inside the window reach the threshold
    #[must_use]
    pub fn is_exceeded(&self, count: u64) -> bool {
        count >= u64::from(self.max_submissions)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
            window_delta: TimeDelta::seconds(300),
            max_submissions: DEFAULT_MAX_SUBMISSIONS,
        }
    }
}
