//! Hot-reloadable denylist support
//!
//! Re-reads the configured denylist source on SIGHUP and swaps it into the
//! running [`DenylistStore`] without restarting the server.

use std::sync::Arc;

use application::{DenylistStore, ports::DenylistSourcePort};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Reloads a [`DenylistStore`] from its source on demand
#[derive(Clone)]
pub struct DenylistReloader {
    store: Arc<DenylistStore>,
    source: Arc<dyn DenylistSourcePort>,
    /// Notifier for successful reloads
    notify: watch::Sender<u64>,
    /// Receiver for successful reloads
    receiver: watch::Receiver<u64>,
}

impl std::fmt::Debug for DenylistReloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenylistReloader")
            .field("source", &self.source.describe())
            .field("generation", &*self.receiver.borrow())
            .finish_non_exhaustive()
    }
}

impl DenylistReloader {
    /// Create a reloader for `store`, reading from `source`
    #[must_use]
    pub fn new(store: Arc<DenylistStore>, source: Arc<dyn DenylistSourcePort>) -> Self {
        let (notify, receiver) = watch::channel(0);
        Self {
            store,
            source,
            notify,
            receiver,
        }
    }

    /// The store this reloader swaps into
    #[must_use]
    pub const fn store(&self) -> &Arc<DenylistStore> {
        &self.store
    }

    /// Reload the denylist from its source
    ///
    /// Returns `true` if the new list is active. On failure the previous
    /// list stays in place.
    pub async fn reload(&self) -> bool {
        match self.store.reload(self.source.as_ref()).await {
            Ok(terms) => {
                self.notify.send_modify(|generation| *generation += 1);
                info!(
                    terms,
                    source = %self.source.describe(),
                    "Denylist reloaded successfully"
                );
                true
            },
            Err(e) => {
                error!(error = %e, "Failed to reload denylist");
                false
            },
        }
    }

    /// Subscribe to reload notifications; the value counts successful reloads
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }
}

/// Spawn a background task that listens for SIGHUP and reloads the denylist
///
/// Returns the reloader so callers can also trigger reloads directly
#[cfg(unix)]
pub fn spawn_denylist_reload_handler(reloader: DenylistReloader) -> DenylistReloader {
    use tokio::signal::unix::{SignalKind, signal};

    let handle = reloader.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "Failed to install SIGHUP handler");
                return;
            },
        };

        while sighup.recv().await.is_some() {
            info!("Received SIGHUP, reloading denylist");
            if !handle.reload().await {
                warn!("Denylist reload failed, keeping previous list");
            }
        }
    });

    reloader
}

/// No-op on non-Unix systems
#[cfg(not(unix))]
pub fn spawn_denylist_reload_handler(reloader: DenylistReloader) -> DenylistReloader {
    warn!("SIGHUP denylist reload not supported on this platform");
    reloader
}

#[cfg(test)]
mod tests {
    use application::LoadError;
    use async_trait::async_trait;
    use infrastructure::InlineDenylistSource;

    use super::*;

    struct UnreachableSource;

    #[async_trait]
    impl DenylistSourcePort for UnreachableSource {
        fn describe(&self) -> String {
            "https://lists.example/bw.txt".to_string()
        }

        async fn read_lines(&self) -> Result<Vec<String>, LoadError> {
            Err(LoadError::fetch(self.describe(), "HTTP 503"))
        }
    }

    #[tokio::test]
    async fn reload_swaps_terms_and_notifies() {
        let store = Arc::new(DenylistStore::from_terms(["spam"]));
        let reloader = DenylistReloader::new(
            Arc::clone(&store),
            Arc::new(InlineDenylistSource::new(["idiot"])),
        );
        let mut receiver = reloader.subscribe();
        assert_eq!(*receiver.borrow(), 0);

        assert!(reloader.reload().await);

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), 1);
        assert!(store.contains("you IDIOT"));
        assert!(!store.contains("spam"));
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_list() {
        let store = Arc::new(DenylistStore::from_terms(["spam"]));
        let reloader = DenylistReloader::new(Arc::clone(&store), Arc::new(UnreachableSource));

        assert!(!reloader.reload().await);
        assert_eq!(*reloader.subscribe().borrow(), 0);
        assert!(store.contains("spammy"));
    }

    #[test]
    fn debug_names_source() {
        let store = Arc::new(DenylistStore::from_terms(["spam"]));
        let reloader = DenylistReloader::new(
            Arc::clone(&store),
            Arc::new(InlineDenylistSource::new(["spam"])),
        );
        assert!(format!("{reloader:?}").contains("inline configuration"));
        assert!(Arc::ptr_eq(reloader.store(), &store));
    }
}
