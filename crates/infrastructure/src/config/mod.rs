//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: submission history store settings
//! - `moderation`: threshold policy, recording policy and denylist source
//!
//! Sources are layered: built-in defaults, then an optional TOML file
//! (`config.toml`, or the path in `MODERATION_CONFIG`), then environment
//! variables such as `MODERATION__SERVER__PORT=8080`.

mod database;
mod moderation;
mod server;

use std::{fmt, path::Path};

use domain::DomainError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use database::DatabaseConfig;
pub use moderation::{DenylistConfig, ModerationConfig};
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "MODERATION_CONFIG";

/// Prefix of configuration environment variables
const ENV_PREFIX: &str = "MODERATION";

/// Separator between nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls whether internal error details are exposed in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - detailed errors
    #[default]
    Development,
    /// Production environment - internal details hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration loading or validation failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The threshold policy is invalid
    #[error(transparent)]
    Policy(#[from] DomainError),

    /// A setting is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Submission history store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Moderation configuration
    #[serde(default)]
    pub moderation: ModerationConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Reads `config.toml` from the working directory if present, or the
    /// file named by `MODERATION_CONFIG`, which must then exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref().map(Path::new))
    }

    /// Load configuration with an explicit file path
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("moderation.denylist.path", "bw.txt")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., MODERATION__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("moderation.denylist.terms"),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(environment = %config.environment, "Configuration loaded");
        Ok(config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.moderation.threshold_policy()?;

        if self.moderation.evaluation_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "moderation.evaluation_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if !self.database.in_memory && self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if let Some(url) = &self.moderation.denylist.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "moderation.denylist.url must be an http(s) URL, got '{url}'"
                )));
            }
        }

        Ok(())
    }

    /// Whether internal error details may be returned to clients
    #[must_use]
    pub fn expose_internal_errors(&self) -> bool {
        self.environment != Environment::Production
    }
}
