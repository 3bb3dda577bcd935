//! Application layer - Moderation use cases and orchestration
//!
//! Contains the moderation pipeline (spam detection, content filtering and
//! the engine composing them) together with the port definitions adapters
//! implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, EvaluationError, LoadError, StoreError};
pub use ports::*;
pub use services::*;
