use axum::extract::State;
use axum::Json;

use crate::metrics::MetricsSnapshot;
use crate::state::AppState;

/// `GET /v1/metrics`: point-in-time intake counters.
pub async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
