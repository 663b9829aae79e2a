//! Submission validation
//!
//! Pure checks on untrusted input, applied before any reference is
//! allocated or any downstream contact is made. The duplicate check reads
//! the reference ledger but never writes it; recording happens at the gate
//! on publish success.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use types::ids::ReferenceId;
use types::submission::{Submission, SubmissionKind};

use crate::ledger::ReferenceLedger;
use crate::models::IngestRequest;

/// Client input errors. Non-retryable; surfaced without downstream contact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown payload type: {value}")]
    UnknownKind { value: String },

    #[error("content is missing or empty")]
    EmptyContent,

    #[error("invalid metadata entry: {key}")]
    InvalidMetadata { key: String },

    #[error("reference already admitted: {reference}")]
    DuplicateReference { reference: String },
}

impl ValidationError {
    /// Stable error kind label used in response bodies.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::UnknownKind { .. } => "UnknownKind",
            Self::EmptyContent => "EmptyContent",
            Self::InvalidMetadata { .. } => "InvalidMetadata",
            Self::DuplicateReference { .. } => "DuplicateReference",
        }
    }
}

/// Validate a raw ingest request into a normalized [`Submission`].
///
/// Rules, in order:
/// - `payload_type` must be one of the three accepted categories
/// - `content` must be non-empty after trimming
/// - metadata entries must have non-empty keys and string values
/// - a caller-supplied reference must be non-empty and must not collide
///   with a reference already admitted within the ledger's retention window
pub fn validate(
    raw: IngestRequest,
    ledger: &ReferenceLedger,
) -> Result<Submission, ValidationError> {
    let kind = SubmissionKind::parse(&raw.payload_type).ok_or_else(|| {
        ValidationError::UnknownKind {
            value: raw.payload_type.clone(),
        }
    })?;

    let content = match raw.content {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ValidationError::EmptyContent),
    };

    let metadata = match raw.metadata {
        Some(entries) => normalize_metadata(entries)?,
        None => HashMap::new(),
    };

    // An empty supplied token is treated as absent: the allocator assigns.
    let reference = match raw.reference_id.and_then(ReferenceId::try_new) {
        Some(reference) => {
            if ledger.contains(&reference) {
                return Err(ValidationError::DuplicateReference {
                    reference: reference.to_string(),
                });
            }
            Some(reference)
        }
        None => None,
    };

    let mut submission = Submission::new(kind, content).with_metadata(metadata);
    if let Some(reference) = reference {
        submission = submission.with_reference(reference);
    }
    Ok(submission)
}

fn normalize_metadata(
    entries: HashMap<String, Value>,
) -> Result<HashMap<String, String>, ValidationError> {
    let mut normalized = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        if key.trim().is_empty() {
            return Err(ValidationError::InvalidMetadata { key });
        }
        match value {
            Value::String(text) => {
                normalized.insert(key, text);
            }
            _ => return Err(ValidationError::InvalidMetadata { key }),
        }
    }
    Ok(normalized)
}
