//! Denylist source port
//!
//! A denylist source is anything that yields a sequence of lines: a local
//! file, a configuration value or a remote list.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::LoadError;

/// Port for reading raw denylist lines
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DenylistSourcePort: Send + Sync {
    /// Human-readable location of the source, used in logs and errors
    fn describe(&self) -> String;

    /// Read every line of the source
    ///
    /// Lines are returned unprocessed; trimming, lowercasing and blank-line
    /// removal happen when the denylist is built.
    async fn read_lines(&self) -> Result<Vec<String>, LoadError>;
}
