//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod denylist_source;

pub use denylist_source::{
    FileDenylistSource, HttpDenylistSource, InlineDenylistSource, denylist_source_from_config,
};
