//! API error handling
//!
//! A submission that could not be moderated is answered with a 503 and never
//! with a verdict. Store details are only included in the body outside of
//! production.

use application::ApplicationError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Seconds a client should wait before retrying a retryable failure
const RETRY_AFTER_SECS: &str = "1";

/// Configure whether internal error details should be exposed in responses.
///
/// In production environments, this should be set to `false`. Store errors
/// carry file paths and connection details.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submission could not be moderated; neither approved nor rejected
    #[error("Moderation unavailable: {message}")]
    ModerationUnavailable { message: String, retryable: bool },
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Build a body without details
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }
}

impl ApiError {
    /// Render the error, including store details only when `expose_details`
    fn render(self, expose_details: bool) -> Response {
        let Self::ModerationUnavailable { message, retryable } = self;

        let body = ErrorResponse {
            details: expose_details.then_some(message),
            ..ErrorResponse::new(
                "Feedback could not be moderated right now, please retry",
                "moderation_unavailable",
            )
        };

        let mut response = (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
        if retryable {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(should_expose_details())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match &err {
            ApplicationError::Evaluation(_) => warn!(error = %err, "Evaluation produced no verdict"),
            ApplicationError::Store(_) => warn!(error = %err, "Failed to record moderated submission"),
        }
        Self::ModerationUnavailable {
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use application::{EvaluationError, StoreError};

    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn unavailable(retryable: bool) -> ApiError {
        ApiError::ModerationUnavailable {
            message: "Submission history unavailable: sqlite:/var/lib/moderation.db".to_string(),
            retryable,
        }
    }

    #[test]
    fn api_error_message() {
        assert_eq!(
            unavailable(true).to_string(),
            "Moderation unavailable: Submission history unavailable: sqlite:/var/lib/moderation.db"
        );
    }

    #[test]
    fn error_response_serialization() {
        let json = serde_json::to_string(&ErrorResponse::new("Invalid body", "validation_error")).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("code"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn evaluation_error_converts_to_retryable_unavailable() {
        let source = ApplicationError::from(EvaluationError::from(StoreError::Timeout(
            Duration::from_secs(5),
        )));
        let ApiError::ModerationUnavailable { retryable, message } = ApiError::from(source);
        assert!(retryable);
        assert!(message.contains("timed out"));
    }

    #[test]
    fn record_failure_converts_to_unavailable() {
        let source = ApplicationError::from(StoreError::Query("disk I/O error".into()));
        let ApiError::ModerationUnavailable { retryable, .. } = ApiError::from(source);
        assert!(!retryable);
    }

    #[tokio::test]
    async fn retryable_failure_sets_retry_after() {
        let response = unavailable(true).render(true);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[RETRY_AFTER], "1");

        let body = body_of(response).await;
        assert_eq!(body.code, "moderation_unavailable");
    }

    #[test]
    fn non_retryable_failure_has_no_retry_after() {
        let response = unavailable(false).render(true);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().get(RETRY_AFTER).is_none());
    }

    #[tokio::test]
    async fn details_are_shown_when_exposed() {
        let body = body_of(unavailable(true).render(true)).await;
        assert!(body.details.unwrap().contains("sqlite:"));
    }

    #[tokio::test]
    async fn details_are_hidden_in_production() {
        let body = body_of(unavailable(true).render(false)).await;
        assert!(body.details.is_none());
        assert!(!body.error.contains("sqlite:"));
    }
}
