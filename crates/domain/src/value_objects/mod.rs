//! Value Objects - Immutable, identity-less domain primitives

mod recording_policy;
mod submitter_id;
mod threshold_policy;

pub use recording_policy::RecordingPolicy;
pub use submitter_id::SubmitterId;
pub use threshold_policy::{DEFAULT_MAX_SUBMISSIONS, DEFAULT_WINDOW_SECS, ThresholdPolicy};
