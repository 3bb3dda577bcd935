//! Submitter identity value object
//!
//! The identity a submission is rate-limited under, usually an e-mail
//! address. The moderation core does not validate its format.
//!
//! # Examples
//!
//! ```
//! use domain::SubmitterId;
//!
//! let id = SubmitterId::new("a@x.com");
//! assert_eq!(id.as_str(), "a@x.com");
//!
//! // Identities are compared exactly, without case folding
//! assert_ne!(SubmitterId::new("A@x.com"), id);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a feedback submitter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmitterId(String);

impl SubmitterId {
    /// Wrap a raw identity string as-is
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// Get the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identity and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SubmitterId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SubmitterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for SubmitterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
