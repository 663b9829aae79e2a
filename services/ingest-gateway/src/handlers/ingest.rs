use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{IngestRequest, IngestResponse};
use crate::state::AppState;

/// `POST /v1/ingest`: admit a submission into the pipeline.
///
/// `accepted: true` is returned only after the outbound queue acknowledged
/// the handoff. Rejections echo the caller's reference (or the allocated
/// one for publish failures) so resubmission stays idempotent.
pub async fn ingest(
    State(state): State<AppState>,
    Json(payload): Json<IngestRequest>,
) -> Response {
    let supplied_reference = payload.reference_id.clone().unwrap_or_default();

    match state.gate.admit(payload).await {
        Ok(admitted) => (
            StatusCode::OK,
            Json(IngestResponse::accepted(admitted.reference.to_string())),
        )
            .into_response(),
        Err(err) => {
            let reference = err
                .reference()
                .map(str::to_string)
                .unwrap_or(supplied_reference);
            let body = IngestResponse::rejected(reference, err.kind_label());
            (err.status_code(), Json(body)).into_response()
        }
    }
}
