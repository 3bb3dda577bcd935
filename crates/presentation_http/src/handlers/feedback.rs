//! Feedback approval handler

use axum::{Json, extract::State};
use chrono::Utc;
use domain::{Submission, Verdict};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Feedback form submission
///
/// Every field is required. Only `email` and `message` influence moderation;
/// the rest is accepted so the form can be posted unchanged.
///
/// The length limits on `email` and `message` bound what the transport
/// accepts. The engine itself takes any identity and message.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    pub name: String,
    /// Submitter identity for rate limiting, compared exactly
    #[validate(length(min = 1, max = 320, message = "must be between 1 and 320 characters"))]
    #[schema(example = "a@x.com", min_length = 1, max_length = 320)]
    pub email: String,
    pub feedback_type: String,
    pub service: String,
    /// Text checked against the denylist
    #[validate(length(max = 10000, message = "must be at most 10000 characters"))]
    #[schema(example = "Great service!", max_length = 10000)]
    pub message: String,
    pub rating: i32,
    pub attach_screenshot: bool,
    pub agree_to_terms: bool,
}

impl FeedbackInput {
    /// The moderation view of this input, ingested at `received_at`
    #[must_use]
    pub fn into_submission(self, received_at: chrono::DateTime<Utc>) -> Submission {
        Submission::new(self.email, self.message, received_at)
    }
}

/// Moderation outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApprovalResponse {
    pub approved: bool,
    #[schema(example = "Feedback approved.")]
    pub reason: String,
}

impl From<Verdict> for ApprovalResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            approved: verdict.approved(),
            reason: verdict.reason().to_string(),
        }
    }
}

/// Decide whether a feedback submission is accepted
#[utoipa::path(
    post,
    path = "/v1/feedback/approve",
    tag = "feedback",
    request_body = FeedbackInput,
    responses(
        (status = 200, description = "Verdict reached", body = ApprovalResponse),
        (status = 400, description = "Malformed or invalid body", body = crate::error::ErrorResponse),
        (status = 413, description = "Body over the configured size limit", body = crate::error::ErrorResponse),
        (status = 503, description = "Submission could not be moderated", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, input), fields(message_len = input.message.len()))]
pub async fn approve_feedback(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FeedbackInput>,
) -> Result<Json<ApprovalResponse>, ApiError> {
    let submission = input.into_submission(Utc::now());

    let verdict = state
        .intake
        .submit(&submission, Some(state.evaluation_timeout()))
        .await?;

    Ok(Json(verdict.into()))
}
