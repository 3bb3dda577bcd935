//! Application-level errors
//!
//! Three failure kinds make up the moderation error taxonomy:
//! - [`LoadError`]: the denylist could not be loaded (fatal at startup)
//! - [`StoreError`]: the submission history could not answer (transient)
//! - [`EvaluationError`]: an evaluation failed on a [`StoreError`]; it is
//!   neither an approval nor a rejection

use std::time::Duration;

use thiserror::Error;

/// Denylist loading failure
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read (missing, permission denied, I/O fault)
    #[error("Failed to read denylist from {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// A remote source could not be fetched
    #[error("Failed to fetch denylist from {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    /// The source yielded no terms and an empty denylist was not allowed
    #[error("Denylist from {source_name} contains no terms and empty denylists are not allowed")]
    Empty { source_name: String },
}

impl LoadError {
    /// Create a fetch error
    pub fn fetch(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Submission history failure
#[derive(Debug, Error)]
pub enum StoreError {
    /// The query did not complete before its deadline
    #[error("Submission history query timed out after {0:?}")]
    Timeout(Duration),

    /// The store could not be reached
    #[error("Submission history unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the query
    #[error("Submission history query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Check if retrying the same request may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Unavailable(_))
    }
}

/// A moderation evaluation that produced no verdict
#[derive(Debug, Error)]
#[error("Could not moderate submission: {source}")]
pub struct EvaluationError {
    #[from]
    source: StoreError,
}

impl EvaluationError {
    /// The store failure behind this evaluation error
    pub const fn store_error(&self) -> &StoreError {
        &self.source
    }

    /// Check if the evaluation may be retried
    pub const fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}

/// Failure of a feedback submission
///
/// Either the evaluation produced no verdict, or the verdict could not be
/// recorded. Neither is an approval or a rejection.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Evaluation failed without a verdict
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// The submission history rejected the record write
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Evaluation(e) => e.is_retryable(),
            Self::Store(e) => e.is_retryable(),
        }
    }
}
