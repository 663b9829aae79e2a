//! Intake pipeline counters
//!
//! Plain atomic counters over the admission flow, with a serializable
//! snapshot surfaced at `/v1/metrics`. This is an internal counter dump for
//! operators, not a metrics platform.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Core counters for the intake gateway.
#[derive(Debug, Default)]
pub struct IntakeMetrics {
    pub submissions_received: AtomicU64,
    pub submissions_accepted: AtomicU64,
    pub rejected_validation: AtomicU64,
    pub rejected_overloaded: AtomicU64,
    pub allocation_failures: AtomicU64,
    pub publish_attempts: AtomicU64,
    pub publish_retries: AtomicU64,
    pub publish_failures: AtomicU64,
}

impl IntakeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.submissions_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accepted(&self) {
        self.submissions_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.rejected_validation.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_overload_rejection(&self) {
        self.rejected_overloaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_allocation_failure(&self) {
        self.allocation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_attempt(&self) {
        self.publish_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_retry(&self) {
        self.publish_retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time view of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submissions_received: self.submissions_received.load(Ordering::Relaxed),
            submissions_accepted: self.submissions_accepted.load(Ordering::Relaxed),
            rejected_validation: self.rejected_validation.load(Ordering::Relaxed),
            rejected_overloaded: self.rejected_overloaded.load(Ordering::Relaxed),
            allocation_failures: self.allocation_failures.load(Ordering::Relaxed),
            publish_attempts: self.publish_attempts.load(Ordering::Relaxed),
            publish_retries: self.publish_retries.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
        }
    }
}

/// Serializable counter snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub submissions_received: u64,
    pub submissions_accepted: u64,
    pub rejected_validation: u64,
    pub rejected_overloaded: u64,
    pub allocation_failures: u64,
    pub publish_attempts: u64,
    pub publish_retries: u64,
    pub publish_failures: u64,
}
