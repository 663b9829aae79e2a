//! Wire data-transfer models for the HTTP boundary
//!
//! The request shape stays loosely typed on purpose: `payload_type` arrives
//! as a bare string and metadata values as raw JSON so the submission
//! validator, not the deserializer, owns the rejection semantics and error
//! taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of `POST /v1/ingest`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    /// Declared category: "market_data" | "user_query" | "news"
    pub payload_type: String,
    /// Opaque text payload
    #[serde(default)]
    pub content: Option<String>,
    /// Optional string-to-string annotations
    #[serde(default)]
    pub metadata: Option<HashMap<String, Value>>,
    /// Optional caller-supplied reference token
    #[serde(default)]
    pub reference_id: Option<String>,
}

/// Body of every `POST /v1/ingest` response, success or rejection.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    /// True only when the submission was durably handed off
    pub accepted: bool,
    /// Finalized reference on success; original-or-empty on rejection
    pub reference_id: String,
    /// Error kind label on rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestResponse {
    pub fn accepted(reference_id: impl Into<String>) -> Self {
        Self {
            accepted: true,
            reference_id: reference_id.into(),
            error: None,
        }
    }

    pub fn rejected(reference_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reference_id: reference_id.into(),
            error: Some(error.into()),
        }
    }
}

/// Body of `GET /v1/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
