//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{sync::Arc, time::Duration};

use application::{
    ContentFilter, DenylistStore, FeedbackIntakeService, ModerationService, SpamDetector,
    StoreError, ports::SubmissionHistoryPort,
};
use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, TimeDelta, Utc};
use domain::{RecordingPolicy, SubmissionRecord, SubmitterId, ThresholdPolicy};
use infrastructure::{AppConfig, InMemorySubmissionHistory};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

const APPROVED: &str = "Feedback approved.";
const TOO_MANY: &str = "Too many submissions in a short time period. Please try again later.";
const INAPPROPRIATE: &str = "Inappropriate language detected in the feedback message.";

/// History whose every query fails
struct BrokenHistory;

#[async_trait]
impl SubmissionHistoryPort for BrokenHistory {
    async fn count_since(
        &self,
        _identity: &SubmitterId,
        _threshold: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn record(&self, _record: &SubmissionRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn is_available(&self) -> bool {
        false
    }
}

/// History that never answers within any reasonable deadline
struct StalledHistory;

#[async_trait]
impl SubmissionHistoryPort for StalledHistory {
    async fn count_since(
        &self,
        _identity: &SubmitterId,
        _threshold: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(0)
    }

    async fn record(&self, _record: &SubmissionRecord) -> Result<(), StoreError> {
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

fn create_test_state(history: Arc<dyn SubmissionHistoryPort>, config: AppConfig) -> AppState {
    let denylist = Arc::new(DenylistStore::from_terms(["spam", "idiot"]));
    let policy = config
        .moderation
        .threshold_policy()
        .expect("valid threshold policy");
    let moderation = ModerationService::new(
        SpamDetector::new(Arc::clone(&history), policy),
        ContentFilter::new(Arc::clone(&denylist)),
    );
    let intake = FeedbackIntakeService::new(moderation, history, config.moderation.recording_policy);
    AppState::new(intake, denylist, config)
}

fn create_server_with(history: Arc<dyn SubmissionHistoryPort>, config: AppConfig) -> TestServer {
    let router = create_router(create_test_state(history, config));
    TestServer::new(router).expect("Failed to create test server")
}

fn create_test_server() -> (TestServer, Arc<InMemorySubmissionHistory>) {
    let history = Arc::new(InMemorySubmissionHistory::new());
    let server = create_server_with(history.clone(), AppConfig::default());
    (server, history)
}

fn feedback(email: &str, message: &str) -> Value {
    json!({
        "name": "Ada",
        "email": email,
        "feedbackType": "general",
        "service": "support",
        "message": message,
        "rating": 5,
        "attachScreenshot": false,
        "agreeToTerms": true
    })
}

async fn approve(server: &TestServer, body: &Value) -> axum_test::TestResponse {
    server.post("/v1/feedback/approve").json(body).await
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_endpoint_returns_ready_when_history_reachable() {
    let (server, _) = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["history"]["healthy"], true);
    assert_eq!(body["denylist"]["terms"], 2);
}

#[tokio::test]
async fn readiness_endpoint_returns_unavailable_when_history_down() {
    let server = create_server_with(Arc::new(BrokenHistory), AppConfig::default());

    let response = server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["history"]["healthy"], false);
}

// ============ Feedback Endpoint Tests ============

#[tokio::test]
async fn clean_feedback_is_approved() {
    let (server, history) = create_test_server();

    let response = approve(&server, &feedback("a@x.com", "Great service!")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"approved": true, "reason": APPROVED}));
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn denylisted_term_is_rejected() {
    let (server, _) = create_test_server();

    let response = approve(&server, &feedback("a@x.com", "This is SPAMmy")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["approved"], false);
    assert_eq!(body["reason"], INAPPROPRIATE);
}

#[tokio::test]
async fn sixth_submission_in_window_is_spam() {
    let (server, _) = create_test_server();
    let body = feedback("a@x.com", "Great service!");

    for _ in 0..5 {
        let response = approve(&server, &body).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["approved"], true);
    }

    let response = approve(&server, &body).await;
    response.assert_status_ok();
    let verdict: Value = response.json();
    assert_eq!(verdict["approved"], false);
    assert_eq!(verdict["reason"], TOO_MANY);
}

#[tokio::test]
async fn spam_reason_wins_over_denylisted_term() {
    let (server, history) = create_test_server();
    let now = Utc::now();
    for minutes in 1..=5 {
        history
            .record(&SubmissionRecord::new("a@x.com", now - TimeDelta::minutes(minutes)))
            .await
            .expect("record");
    }

    let response = approve(&server, &feedback("a@x.com", "you idiot")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["reason"], TOO_MANY);
}

#[tokio::test]
async fn old_submissions_do_not_count() {
    let (server, history) = create_test_server();
    let long_ago = Utc::now() - TimeDelta::minutes(10);
    for _ in 0..6 {
        history
            .record(&SubmissionRecord::new("a@x.com", long_ago))
            .await
            .expect("record");
    }

    let response = approve(&server, &feedback("a@x.com", "Great service!")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["approved"], true);
}

#[tokio::test]
async fn identities_are_limited_independently() {
    let (server, _) = create_test_server();

    for _ in 0..5 {
        approve(&server, &feedback("a@x.com", "hello")).await.assert_status_ok();
    }

    let response = approve(&server, &feedback("A@X.com", "hello")).await;
    assert_eq!(response.json::<Value>()["approved"], true);
}

#[tokio::test]
async fn approved_only_policy_ignores_rejections() {
    let history = Arc::new(InMemorySubmissionHistory::new());
    let mut config = AppConfig::default();
    config.moderation.recording_policy = RecordingPolicy::ApprovedOnly;
    let server = create_server_with(history.clone(), config);

    for _ in 0..3 {
        approve(&server, &feedback("a@x.com", "spam spam spam")).await.assert_status_ok();
    }
    approve(&server, &feedback("a@x.com", "Great service!")).await.assert_status_ok();

    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn custom_threshold_applies() {
    let mut config = AppConfig::default();
    config.moderation.max_submissions = 1;
    let policy = ThresholdPolicy::from_secs(300, 1).expect("valid policy");
    assert_eq!(config.moderation.threshold_policy().expect("valid"), policy);
    let server = create_server_with(Arc::new(InMemorySubmissionHistory::new()), config);

    let body = feedback("a@x.com", "Great service!");
    assert_eq!(approve(&server, &body).await.json::<Value>()["approved"], true);
    assert_eq!(approve(&server, &body).await.json::<Value>()["reason"], TOO_MANY);
}

// ============ Failure Tests ============

#[tokio::test]
async fn store_failure_returns_moderation_unavailable() {
    let server = create_server_with(Arc::new(BrokenHistory), AppConfig::default());

    let response = approve(&server, &feedback("a@x.com", "Great service!")).await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["code"], "moderation_unavailable");
    assert!(body.get("approved").is_none());
    assert!(body.get("reason").is_none());
}

#[tokio::test]
async fn stalled_store_times_out_as_moderation_unavailable() {
    let mut config = AppConfig::default();
    config.moderation.evaluation_timeout_ms = 50;
    let server = create_server_with(Arc::new(StalledHistory), config);

    let response = approve(&server, &feedback("a@x.com", "Great service!")).await;

    response.assert_status_service_unavailable();
    assert_eq!(response.header("retry-after"), "1");
    assert_eq!(response.json::<Value>()["code"], "moderation_unavailable");
}

// ============ Validation Tests ============

#[tokio::test]
async fn empty_email_is_rejected() {
    let (server, history) = create_test_server();

    let response = approve(&server, &feedback("", "Great service!")).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["code"], "validation_error");
    assert!(history.is_empty());
}

#[tokio::test]
async fn overlong_message_is_rejected() {
    let (server, _) = create_test_server();

    let response = approve(&server, &feedback("a@x.com", &"x".repeat(10_001))).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["code"], "validation_error");
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let (server, _) = create_test_server();
    let mut body = feedback("a@x.com", "Great service!");
    body.as_object_mut().expect("object").remove("agreeToTerms");

    let response = approve(&server, &body).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["code"], "validation_error");
}

#[tokio::test]
async fn wrong_field_type_is_rejected() {
    let (server, _) = create_test_server();
    let mut body = feedback("a@x.com", "Great service!");
    body["rating"] = json!("five");

    let response = approve(&server, &body).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn body_over_limit_is_payload_too_large() {
    let history = Arc::new(InMemorySubmissionHistory::new());
    let mut config = AppConfig::default();
    config.server.max_body_size_json_bytes = 256;
    let server = create_server_with(history.clone(), config);

    let response = approve(&server, &feedback("a@x.com", &"x".repeat(1_000))).await;

    response.assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>()["code"], "payload_too_large");
    assert!(history.is_empty());
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let (server, _) = create_test_server();

    let response = server
        .post("/v1/feedback/approve")
        .text("approve me")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["code"], "validation_error");
}

// ============ Documentation Tests ============

#[tokio::test]
async fn openapi_document_is_served() {
    let (server, _) = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["openapi"].as_str().expect("version").starts_with("3."));
    assert!(doc["paths"]["/v1/feedback/approve"]["post"].is_object());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (server, _) = create_test_server();

    let response = server.get("/v1/feedback").await;

    response.assert_status_not_found();
}
