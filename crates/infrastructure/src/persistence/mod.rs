//! Persistence module
//!
//! Submission history stores: SQLite via sqlx, and an in-process map.

pub mod async_connection;
pub mod error;
pub mod in_memory_history;
pub mod submission_history_store;

use std::sync::Arc;

use application::ports::SubmissionHistoryPort;
use tracing::{info, warn};

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use in_memory_history::InMemorySubmissionHistory;
pub use submission_history_store::SqliteSubmissionHistory;

use crate::config::DatabaseConfig;

/// Open the submission history named by configuration
///
/// Connects the SQLite pool and runs migrations when enabled, or returns an
/// in-process store when `in_memory` is set.
pub async fn connect_submission_history(
    config: &DatabaseConfig,
) -> Result<Arc<dyn SubmissionHistoryPort>, AsyncDatabaseError> {
    if config.in_memory {
        warn!("Using in-memory submission history; records are lost on restart");
        return Ok(Arc::new(InMemorySubmissionHistory::new()));
    }

    let db = AsyncDatabase::new(&AsyncDatabaseConfig::from(config)).await?;
    if config.run_migrations {
        db.migrate().await?;
    }

    info!(path = %config.path, "SQLite submission history ready");
    Ok(Arc::new(SqliteSubmissionHistory::new(db.pool().clone())))
}
