//! Reference allocation
//!
//! Issues globally unique reference tokens for submissions that arrive
//! without one. UUID v7 gives collision-free, time-sortable tokens with no
//! coordination between concurrent callers and no I/O on the allocation
//! path.

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use types::ids::ReferenceId;

/// Internal resource exhaustion. Practically unreachable; callers must
/// reject the submission rather than admit it with a colliding reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("reference allocation space exhausted after {issued} issues")]
    Exhausted { issued: u64 },
}

/// Allocates process-unique reference identifiers.
///
/// Safe to call from any number of tasks concurrently; the only shared
/// state is the issuance counter.
#[derive(Debug, Default)]
pub struct ReferenceAllocator {
    issued: AtomicU64,
}

impl ReferenceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh reference.
    pub fn allocate(&self) -> Result<ReferenceId, AllocationError> {
        let issued = self.issued.fetch_add(1, Ordering::Relaxed);
        if issued == u64::MAX {
            // Counter wrapped; refuse rather than risk reuse.
            return Err(AllocationError::Exhausted { issued });
        }
        Ok(ReferenceId::generate())
    }

    /// Total references issued by this allocator.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_allocate_is_unique() {
        let allocator = ReferenceAllocator::new();
        let a = allocator.allocate().unwrap();
        let b = allocator.allocate().unwrap();
        assert_ne!(a, b);
        assert_eq!(allocator.issued(), 2);
    }

    #[test]
    fn test_concurrent_allocation_produces_distinct_ids() {
        let allocator = Arc::new(ReferenceAllocator::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let allocator = Arc::clone(&allocator);
            handles.push(std::thread::spawn(move || {
                (0..250)
                    .map(|_| allocator.allocate().unwrap())
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for reference in handle.join().unwrap() {
                assert!(
                    seen.insert(reference.to_string()),
                    "allocator issued a colliding reference"
                );
            }
        }
        assert_eq!(seen.len(), 2000);
        assert_eq!(allocator.issued(), 2000);
    }
}
