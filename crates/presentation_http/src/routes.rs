//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Feedback API (v1)
        .route(
            "/v1/feedback/approve",
            post(handlers::feedback::approve_feedback),
        )
        // API documentation
        .merge(openapi::create_openapi_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        // Attach state
        .with_state(state)
}
