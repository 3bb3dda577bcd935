//! Submission history store configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,

    /// How long to wait for a pooled connection, in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Keep submission history in process memory instead of SQLite
    ///
    /// History is lost on restart; meant for development and tests.
    #[serde(default)]
    pub in_memory: bool,
}

fn default_db_path() -> String {
    "moderation.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
            acquire_timeout_secs: default_acquire_timeout(),
            in_memory: false,
        }
    }
}
