//! Backpressure for outbound publishes
//!
//! Bounds the number of concurrently in-flight publishes. When the bound is
//! reached, new admissions fail fast instead of queueing unboundedly in
//! memory; the caller sees a distinct overload rejection and can back off.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Counting limiter over in-flight publishes.
#[derive(Debug)]
pub struct InFlightLimiter {
    max_in_flight: usize,
    in_flight: AtomicUsize,
    rejections: AtomicUsize,
}

impl InFlightLimiter {
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            in_flight: AtomicUsize::new(0),
            rejections: AtomicUsize::new(0),
        }
    }

    /// Try to reserve an in-flight slot.
    ///
    /// Returns None immediately when the configured maximum is reached.
    /// The returned permit releases the slot on drop and can cross task
    /// boundaries, which is why acquisition goes through the `Arc`.
    pub fn try_acquire(limiter: &Arc<Self>) -> Option<InFlightPermit> {
        let mut current = limiter.in_flight.load(Ordering::Acquire);
        loop {
            if current >= limiter.max_in_flight {
                let rejections = limiter.rejections.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    in_flight = current,
                    max_in_flight = limiter.max_in_flight,
                    rejections,
                    "In-flight publish limit reached, rejecting admission"
                );
                return None;
            }
            match limiter.in_flight.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    return Some(InFlightPermit {
                        limiter: Arc::clone(limiter),
                    })
                }
                Err(observed) => current = observed,
            }
        }
    }

    /// Publishes currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Admissions rejected for overload since startup.
    pub fn rejections(&self) -> usize {
        self.rejections.load(Ordering::Relaxed)
    }
}

/// RAII slot reservation; releasing is dropping.
#[derive(Debug)]
pub struct InFlightPermit {
    limiter: Arc<InFlightLimiter>,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.limiter.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
