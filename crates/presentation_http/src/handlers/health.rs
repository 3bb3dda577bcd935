//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is running", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub history: HistoryStatus,
    pub denylist: DenylistStatus,
}

/// Submission history reachability
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryStatus {
    pub healthy: bool,
}

/// Active denylist
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DenylistStatus {
    pub terms: usize,
}

/// Readiness check - can submissions be moderated right now?
///
/// The denylist is loaded before the server binds, so readiness hinges on
/// the submission history answering.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to moderate", body = ReadinessResponse),
        (status = 503, description = "Submission history unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let history_healthy = state.intake.is_history_available().await;
    if !history_healthy {
        warn!("Readiness check failed: submission history unreachable");
    }

    let status_code = if history_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: history_healthy,
            history: HistoryStatus {
                healthy: history_healthy,
            },
            denylist: DenylistStatus {
                terms: state.denylist.len(),
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_crate_version() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn health_response_deserialization() {
        let json = r#"{"status":"ok","version":"0.1.0"}"#;
        let resp: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, "0.1.0");
    }

    #[test]
    fn readiness_response_serialization() {
        let resp = ReadinessResponse {
            ready: false,
            history: HistoryStatus { healthy: false },
            denylist: DenylistStatus { terms: 2 },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ready": false,
                "history": {"healthy": false},
                "denylist": {"terms": 2}
            })
        );
    }
}
