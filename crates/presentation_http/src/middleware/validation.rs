//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.
//! Malformed bodies, missing fields and failed field rules all produce a 400
//! with code `validation_error`; a body over the configured size limit keeps
//! its 413. None of them reach moderation.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Body could not be buffered, e.g. over `DefaultBodyLimit`
            Self::JsonError(e @ JsonRejection::BytesRejection(_)) => (e.status(), e.body_text()),
            Self::JsonError(e) => (StatusCode::BAD_REQUEST, e.body_text()),
            Self::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "payload_too_large"
        } else {
            "validation_error"
        };
        debug!(error = %message, %status, "Request body rejected");

        (status, Json(ErrorResponse::new(message, code))).into_response()
    }
}

/// Render field errors as `field: message` pairs in field order
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{field}: {}",
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A JSON extractor that also validates the request body
///
/// Use this instead of `Json<T>` when you want automatic validation
/// of the request body using the `validator` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;

        Ok(Self(value))
    }
}
