//! Application services

mod content_filter;
mod denylist_store;
mod feedback_intake_service;
mod moderation_service;
mod spam_detector;

pub use content_filter::ContentFilter;
pub use denylist_store::{DenylistStore, EmptyDenylist};
pub use feedback_intake_service::FeedbackIntakeService;
pub use moderation_service::ModerationService;
pub use spam_detector::SpamDetector;
