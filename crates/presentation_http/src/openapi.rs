//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 description of the moderation API as JSON.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{handlers, state::AppState};

/// Path the OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for the moderation API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback Moderation API",
        description = "Decides whether a feedback submission is accepted, rejecting \
                       submitters over the rate threshold and messages containing denylisted terms"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check and readiness endpoints"),
        (name = "feedback", description = "Feedback moderation")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::feedback::approve_feedback,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::HistoryStatus,
            handlers::health::DenylistStatus,
            handlers::feedback::FeedbackInput,
            handlers::feedback::ApprovalResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create the OpenAPI document route
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
