//! Denylist store
//!
//! Holds the loaded denylist as an immutable snapshot behind an [`ArcSwap`].
//! Readers take a lock-free snapshot per lookup; a reload builds a complete
//! new snapshot first and publishes it with one atomic swap, so readers
//! never observe a partially loaded list.
//!
//! Matching uses a multi-pattern Aho-Corasick automaton over the lowercased
//! terms, run against the lowercased message.

use std::sync::Arc;

use aho_corasick::AhoCorasick;
use arc_swap::ArcSwap;
use domain::Denylist;
use tracing::{debug, info, instrument, warn};

use crate::{error::LoadError, ports::DenylistSourcePort};

/// Whether a load that yields zero terms is acceptable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDenylist {
    /// Zero terms is a [`LoadError::Empty`]
    #[default]
    Reject,
    /// The operator explicitly opted in to running without terms
    Allow,
}

/// One immutable generation of the denylist
#[derive(Debug)]
struct DenylistSnapshot {
    denylist: Denylist,
    automaton: Option<AhoCorasick>,
}

impl DenylistSnapshot {
    fn build(denylist: Denylist) -> Self {
        let automaton = if denylist.is_empty() {
            None
        } else {
            match AhoCorasick::new(denylist.terms()) {
                Ok(automaton) => Some(automaton),
                Err(e) => {
                    warn!(error = %e, terms = denylist.len(), "Falling back to linear denylist scan");
                    None
                },
            }
        };
        Self {
            denylist,
            automaton,
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        match &self.automaton {
            Some(automaton) => automaton.is_match(lowered),
            None => self.denylist.terms().any(|term| lowered.contains(term)),
        }
    }
}

/// Process-wide holder of the current denylist
#[derive(Debug)]
pub struct DenylistStore {
    current: ArcSwap<DenylistSnapshot>,
    empty_policy: EmptyDenylist,
}

impl DenylistStore {
    /// Create a store from an already built denylist
    #[must_use]
    pub fn new(denylist: Denylist) -> Self {
        Self::with_policy(denylist, EmptyDenylist::Allow)
    }

    /// Create a store from terms, e.g. for inline configuration and tests
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Denylist::from_lines(terms))
    }

    fn with_policy(denylist: Denylist, empty_policy: EmptyDenylist) -> Self {
        Self {
            current: ArcSwap::from_pointee(DenylistSnapshot::build(denylist)),
            empty_policy,
        }
    }

    /// Load the denylist from a source
    ///
    /// Fails if the source cannot be read, or if it yields no terms while
    /// `empty_policy` is [`EmptyDenylist::Reject`].
    #[instrument(skip(source), fields(source = %source.describe()))]
    pub async fn load(
        source: &dyn DenylistSourcePort,
        empty_policy: EmptyDenylist,
    ) -> Result<Self, LoadError> {
        let denylist = Self::read(source, empty_policy).await?;
        info!(terms = denylist.len(), "Denylist loaded");
        Ok(Self::with_policy(denylist, empty_policy))
    }

    /// Re-read the source and atomically publish the new denylist
    ///
    /// On failure the previous denylist stays in effect.
    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub async fn reload(&self, source: &dyn DenylistSourcePort) -> Result<usize, LoadError> {
        let denylist = Self::read(source, self.empty_policy).await?;
        let terms = denylist.len();
        self.replace(denylist);
        info!(terms, "Denylist reloaded");
        Ok(terms)
    }

    /// Atomically replace the current denylist
    pub fn replace(&self, denylist: Denylist) {
        let previous = self.current.swap(Arc::new(DenylistSnapshot::build(denylist)));
        debug!(previous_terms = previous.denylist.len(), "Denylist snapshot swapped");
    }

    /// Whether any term occurs in `message`, ignoring case
    pub fn contains(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        self.current.load().matches(&lowered)
    }

    /// Number of terms in the current snapshot
    pub fn len(&self) -> usize {
        self.current.load().denylist.len()
    }

    /// Whether the current snapshot has no terms
    pub fn is_empty(&self) -> bool {
        self.current.load().denylist.is_empty()
    }

    /// Copy of the current denylist
    pub fn snapshot(&self) -> Denylist {
        self.current.load().denylist.clone()
    }

    async fn read(
        source: &dyn DenylistSourcePort,
        empty_policy: EmptyDenylist,
    ) -> Result<Denylist, LoadError> {
        let lines = source.read_lines().await?;
        let denylist = Denylist::from_lines(&lines);

        if denylist.is_empty() {
            if empty_policy == EmptyDenylist::Reject {
                return Err(LoadError::Empty {
                    source_name: source.describe(),
                });
            }
            warn!(source = %source.describe(), "Running with an empty denylist");
        }
        Ok(denylist)
    }
}
