//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Registry**: Reports the number of registered shortcodes
/// 2. **Audit Queue**: Checks the audit channel is open and reports free capacity
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let registry_check = check_registry(&state).await;

    let audit_check = check_audit_queue(&state);

    let all_healthy = registry_check.status == "ok" && audit_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            registry: registry_check,
            audit_queue: audit_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_registry(state: &AppState) -> CheckStatus {
    match state.stats_service.count_links().await {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} shortcodes registered", count)),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Registry error: {}", e)),
        },
    }
}

/// A disabled audit logger counts as healthy.
fn check_audit_queue(state: &AppState) -> CheckStatus {
    if state.audit.is_closed() {
        return CheckStatus {
            status: "error".to_string(),
            message: Some("Audit queue is closed".to_string()),
        };
    }

    let message = match state.audit.capacity() {
        Some(capacity) => format!("Capacity: {}", capacity),
        None => "Auditing disabled".to_string(),
    };

    CheckStatus {
        status: "ok".to_string(),
        message: Some(message),
    }
}
