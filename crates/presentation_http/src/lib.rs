//! Feedback moderation HTTP presentation layer
//!
//! This crate exposes the moderation engine over HTTP: the approval
//! endpoint, health and readiness probes, the OpenAPI document and SIGHUP
//! denylist reload.

pub mod denylist_reload;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use denylist_reload::{DenylistReloader, spawn_denylist_reload_handler};
pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
