//! Port definitions for application layer
//!
//! Ports are interfaces that define how the moderation pipeline interacts
//! with external systems. Adapters in the infrastructure layer implement
//! these ports.

mod denylist_source;
mod submission_history;

#[cfg(test)]
pub use denylist_source::MockDenylistSourcePort;
pub use denylist_source::DenylistSourcePort;
#[cfg(test)]
pub use submission_history::MockSubmissionHistoryPort;
pub use submission_history::SubmissionHistoryPort;
