//! Liveness reporting
//!
//! Trivial by design: recomputed on every probe, no dependencies on the
//! admission path, never persisted. Transport-level failures are reported
//! by the surrounding infrastructure, not here.

use chrono::{DateTime, Utc};

/// Result of a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub state: HealthState,
    pub checked_at: DateTime<Utc>,
}

/// The only reportable state; a process that cannot execute the check
/// cannot answer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Ok,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
        }
    }
}

/// Evaluate liveness.
pub fn check() -> HealthStatus {
    HealthStatus {
        state: HealthState::Ok,
        checked_at: Utc::now(),
    }
}
