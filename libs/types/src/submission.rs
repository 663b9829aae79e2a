//! Submission lifecycle types
//!
//! A `Submission` is a unit of external input that has passed validation
//! but has not yet been handed off. An `AdmittedSubmission` is the record
//! that crosses the boundary to the downstream pipeline: it carries a
//! finalized reference and the admission timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::ids::ReferenceId;

/// Category of external input accepted by the intake gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    /// Exchange/vendor market data payloads
    MarketData,
    /// End-user analytical queries
    UserQuery,
    /// News articles and headlines
    News,
}

impl SubmissionKind {
    /// Parse a wire label, returning None for anything outside the
    /// three accepted categories
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "market_data" => Some(Self::MarketData),
            "user_query" => Some(Self::UserQuery),
            "news" => Some(Self::News),
            _ => None,
        }
    }

    /// Wire label for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketData => "market_data",
            Self::UserQuery => "user_query",
            Self::News => "news",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated submission awaiting reference assignment and handoff
///
/// Immutable once constructed; either promoted to an [`AdmittedSubmission`]
/// or discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Declared input category
    pub kind: SubmissionKind,
    /// Opaque text payload, non-empty
    pub content: String,
    /// Optional string-to-string annotations
    pub metadata: HashMap<String, String>,
    /// Caller-supplied reference, if any
    pub reference: Option<ReferenceId>,
}

impl Submission {
    pub fn new(kind: SubmissionKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            metadata: HashMap::new(),
            reference: None,
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_reference(mut self, reference: ReferenceId) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Promote to an admitted submission with a finalized reference
    pub fn admit(self, reference: ReferenceId, admitted_at: DateTime<Utc>) -> AdmittedSubmission {
        AdmittedSubmission {
            reference,
            kind: self.kind,
            content: self.content,
            metadata: self.metadata,
            admitted_at,
        }
    }
}

/// A submission that passed admission and is bound for the pipeline
///
/// Ownership transfers to the outbound queue on successful publish; the
/// gate keeps no copy afterwards. `reference` is unique for the process
/// lifetime and is reused verbatim across publish retries so downstream
/// consumers can deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmittedSubmission {
    /// Finalized, globally unique reference
    pub reference: ReferenceId,
    /// Declared input category
    pub kind: SubmissionKind,
    /// Opaque text payload
    pub content: String,
    /// String-to-string annotations
    pub metadata: HashMap<String, String>,
    /// Admission timestamp, non-decreasing across admissions in a process
    pub admitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in [
            SubmissionKind::MarketData,
            SubmissionKind::UserQuery,
            SubmissionKind::News,
        ] {
            assert_eq!(SubmissionKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_kind_parse_rejects_unknown_labels() {
        assert_eq!(SubmissionKind::parse("tweets"), None);
        assert_eq!(SubmissionKind::parse("MARKET_DATA"), None);
        assert_eq!(SubmissionKind::parse(""), None);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SubmissionKind::MarketData).unwrap();
        assert_eq!(json, "\"market_data\"");
    }

    #[test]
    fn test_admit_carries_payload_through() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), "reuters".to_string());

        let submission = Submission::new(SubmissionKind::News, "Fed raises rates")
            .with_metadata(metadata.clone());

        let reference = ReferenceId::generate();
        let admitted = submission.admit(reference.clone(), Utc::now());

        assert_eq!(admitted.reference, reference);
        assert_eq!(admitted.kind, SubmissionKind::News);
        assert_eq!(admitted.content, "Fed raises rates");
        assert_eq!(admitted.metadata, metadata);
    }

    #[test]
    fn test_admitted_submission_wire_shape() {
        let admitted = Submission::new(SubmissionKind::UserQuery, "outlook for BTC")
            .admit(ReferenceId::try_new("ref-42").unwrap(), Utc::now());

        let value: serde_json::Value =
            serde_json::to_value(&admitted).unwrap();
        assert_eq!(value["reference"], "ref-42");
        assert_eq!(value["kind"], "user_query");
        assert_eq!(value["content"], "outlook for BTC");
    }
}
