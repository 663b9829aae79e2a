//! Duplicate-reference ledger
//!
//! Remembers the references of successfully published submissions so a
//! caller-supplied reference that collides with a recent admission is
//! rejected instead of republished. Retention is bounded by both a time
//! window and an entry cap; entries past either bound are pruned
//! opportunistically on insert.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use types::ids::ReferenceId;

use crate::config::LedgerConfig;

/// Bounded ledger of recently published references.
///
/// Mutated only by the admission gate at publish-success time; read by the
/// validator for the duplicate check.
pub struct ReferenceLedger {
    // Maps reference token to publish time (Unix millis)
    entries: DashMap<String, i64>,
    retention_ms: i64,
    capacity: usize,
}

impl ReferenceLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            entries: DashMap::new(),
            retention_ms: config.retention.as_millis() as i64,
            capacity: config.capacity.max(1),
        }
    }

    /// Whether the reference was published within the retention window.
    pub fn contains(&self, reference: &ReferenceId) -> bool {
        self.contains_at(reference, now_ms())
    }

    /// Record a published reference.
    pub fn record(&self, reference: &ReferenceId) {
        self.record_at(reference, now_ms());
    }

    /// Number of remembered references, including not-yet-pruned expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains_at(&self, reference: &ReferenceId, now_ms: i64) -> bool {
        match self.entries.get(reference.as_str()) {
            Some(entry) => now_ms - *entry < self.retention_ms,
            None => false,
        }
    }

    fn record_at(&self, reference: &ReferenceId, now_ms: i64) {
        self.entries.insert(reference.as_str().to_string(), now_ms);

        if self.entries.len() > self.capacity {
            self.prune(now_ms);
        }
    }

    /// Drop expired entries; if the cap is still exceeded, drop the oldest.
    fn prune(&self, now_ms: i64) {
        let retention_ms = self.retention_ms;
        self.entries
            .retain(|_, recorded| now_ms - *recorded < retention_ms);

        let overflow = self.entries.len().saturating_sub(self.capacity);
        if overflow > 0 {
            let mut by_age: Vec<(String, i64)> = self
                .entries
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect();
            by_age.sort_by_key(|(_, recorded)| *recorded);

            for (token, _) in by_age.into_iter().take(overflow) {
                self.entries.remove(&token);
            }
        }

        debug!(remaining = self.entries.len(), "Pruned reference ledger");
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ledger(retention: Duration, capacity: usize) -> ReferenceLedger {
        ReferenceLedger::new(LedgerConfig {
            retention,
            capacity,
        })
    }

    fn reference(token: &str) -> ReferenceId {
        ReferenceId::try_new(token).unwrap()
    }

    #[test]
    fn test_recorded_reference_is_found() {
        let ledger = ledger(Duration::from_secs(60), 100);
        let r = reference("ref-1");
        assert!(!ledger.contains(&r));
        ledger.record(&r);
        assert!(ledger.contains(&r));
    }

    #[test]
    fn test_reference_expires_after_retention() {
        let ledger = ledger(Duration::from_millis(100), 100);
        let r = reference("ref-1");
        ledger.record_at(&r, 1_000);
        assert!(ledger.contains_at(&r, 1_050));
        assert!(!ledger.contains_at(&r, 1_100));
    }

    #[test]
    fn test_capacity_overflow_evicts_oldest() {
        let ledger = ledger(Duration::from_secs(3600), 3);
        for (i, token) in ["a", "b", "c", "d"].iter().enumerate() {
            ledger.record_at(&reference(token), 1_000 + i as i64);
        }

        assert!(ledger.len() <= 3);
        assert!(!ledger.contains_at(&reference("a"), 2_000));
        assert!(ledger.contains_at(&reference("d"), 2_000));
    }

    #[test]
    fn test_expired_entries_pruned_before_eviction() {
        let ledger = ledger(Duration::from_millis(10), 2);
        ledger.record_at(&reference("old-1"), 1_000);
        ledger.record_at(&reference("old-2"), 1_001);
        // Both prior entries are expired by now; only the fresh one survives.
        ledger.record_at(&reference("fresh"), 10_000);

        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains_at(&reference("fresh"), 10_005));
    }
}
