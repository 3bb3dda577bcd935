//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: denylist sources,
//! submission history stores, configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use crate::config::{
    AppConfig, ConfigError, DatabaseConfig, DenylistConfig, Environment, ModerationConfig,
    ServerConfig,
};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, InMemorySubmissionHistory,
    SqliteSubmissionHistory, connect_submission_history,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
