//! Content filter
//!
//! Flags messages containing any denylisted term.

use std::sync::Arc;

use super::DenylistStore;

/// Named wrapper over [`DenylistStore::contains`]
#[derive(Debug, Clone)]
pub struct ContentFilter {
    denylist: Arc<DenylistStore>,
}

impl ContentFilter {
    /// Create a content filter over a shared denylist
    #[must_use]
    pub const fn new(denylist: Arc<DenylistStore>) -> Self {
        Self { denylist }
    }

    /// Whether the message contains inappropriate language
    pub fn is_inappropriate(&self, message: &str) -> bool {
        self.denylist.contains(message)
    }

    /// The denylist this filter reads from
    #[must_use]
    pub const fn denylist(&self) -> &Arc<DenylistStore> {
        &self.denylist
    }
}
