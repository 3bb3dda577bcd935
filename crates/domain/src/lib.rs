//! Domain layer for the feedback moderation engine
//!
//! Contains the moderation vocabulary: submissions, verdicts, the denylist
//! term set and the threshold policy. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
