//! Denylist source adapters
//!
//! Implement [`DenylistSourcePort`] for a local file, inline configuration
//! and a remote plain-text list.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use application::{LoadError, ports::DenylistSourcePort};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::DenylistConfig;

/// Newline-delimited denylist file
#[derive(Debug, Clone)]
pub struct FileDenylistSource {
    path: PathBuf,
}

impl FileDenylistSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DenylistSourcePort for FileDenylistSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_lines(&self) -> Result<Vec<String>, LoadError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                source_name: self.describe(),
                source,
            })?;

        debug!(bytes = text.len(), "Denylist file read");
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Terms given directly in configuration
#[derive(Debug, Clone, Default)]
pub struct InlineDenylistSource {
    terms: Vec<String>,
}

impl InlineDenylistSource {
    /// Create a source yielding `terms`
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl DenylistSourcePort for InlineDenylistSource {
    fn describe(&self) -> String {
        "inline configuration".to_string()
    }

    async fn read_lines(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.terms.clone())
    }
}

/// Remote plain-text denylist fetched over HTTP
#[derive(Debug, Clone)]
pub struct HttpDenylistSource {
    client: Client,
    url: String,
}

impl HttpDenylistSource {
    /// Create a source fetching `url`, giving up after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feedback-moderation/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoadError::fetch(&url, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    /// The URL this source fetches
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DenylistSourcePort for HttpDenylistSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn read_lines(&self) -> Result<Vec<String>, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::fetch(&self.url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::fetch(&self.url, format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LoadError::fetch(&self.url, e.to_string()))?;

        debug!(bytes = text.len(), "Denylist fetched");
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Select the denylist source named by configuration
///
/// Precedence: `url`, then non-empty `terms`, then `path`.
pub fn denylist_source_from_config(
    config: &DenylistConfig,
) -> Result<Box<dyn DenylistSourcePort>, LoadError> {
    let source: Box<dyn DenylistSourcePort> = if let Some(url) = &config.url {
        Box::new(HttpDenylistSource::new(
            url,
            Duration::from_secs(config.fetch_timeout_secs),
        )?)
    } else if !config.terms.is_empty() {
        Box::new(InlineDenylistSource::new(config.terms.iter().cloned()))
    } else {
        Box::new(FileDenylistSource::new(&config.path))
    };

    info!(source = %source.describe(), "Denylist source selected");
    Ok(source)
}
