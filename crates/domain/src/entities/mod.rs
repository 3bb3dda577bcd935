//! Domain entities - Objects produced and consumed by the moderation pipeline

mod denylist;
mod submission;
mod verdict;

pub use denylist::Denylist;
pub use submission::{Submission, SubmissionRecord};
pub use verdict::{Verdict, VerdictReason};
