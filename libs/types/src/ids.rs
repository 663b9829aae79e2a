//! Unique identifier types for intake entities
//!
//! Generated references use UUID v7 for time-sortable ordering, enabling
//! efficient chronological queries over admitted submissions downstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Durable reference identity of a submission
///
/// Either supplied by the caller (any non-empty token) or generated at
/// admission time as a UUID v7 so references sort by admission order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    /// Generate a fresh time-sortable reference token
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Try to create a ReferenceId from a caller-supplied token,
    /// returning None if the token is empty after trimming
    pub fn try_new(token: impl Into<String>) -> Option<Self> {
        let s = token.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Get the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
