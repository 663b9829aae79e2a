use axum::Json;

use crate::health;
use crate::models::HealthResponse;

/// `GET /v1/health`: liveness probe used for readiness checks.
pub async fn health_check() -> Json<HealthResponse> {
    let status = health::check();
    Json(HealthResponse {
        status: status.state.as_str(),
        timestamp: status.checked_at,
    })
}
