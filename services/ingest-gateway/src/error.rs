//! HTTP mapping for admission errors
//!
//! The ingest handler owns the response body (it needs the original
//! reference for rejections); this module owns the status and error-kind
//! mapping so the taxonomy stays in one place.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::gate::AdmissionError;
use crate::models::IngestResponse;
use crate::validator::ValidationError;

impl AdmissionError {
    /// Stable error kind label used in response bodies.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.kind_label(),
            Self::Overloaded => "Overloaded",
            Self::Allocation(_) => "AllocationExhausted",
            Self::PublishFailed { .. } => "PublishFailed",
        }
    }

    /// HTTP status for this error.
    ///
    /// Client input errors map to 4xx (409 for a duplicate reference),
    /// overload to 429 so callers back off, and handoff failures to 5xx.
    /// A submission that was not handed off never gets a success status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(ValidationError::DuplicateReference { .. }) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Overloaded => StatusCode::TOO_MANY_REQUESTS,
            Self::Allocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PublishFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Reference to echo in a rejection body, when the error carries one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::PublishFailed { reference, .. } => Some(reference.as_str()),
            _ => None,
        }
    }
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        let body = IngestResponse::rejected(
            self.reference().unwrap_or_default(),
            self.kind_label(),
        );
        (self.status_code(), Json(body)).into_response()
    }
}
