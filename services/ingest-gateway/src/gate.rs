//! Admission gate
//!
//! Orchestrates the intake path: validate the raw input, allocate a
//! reference when the caller supplied none, reserve an in-flight slot, and
//! hand the admitted submission to the outbound queue with bounded retry.
//!
//! Per-submission state machine:
//! `Received → Validated → (Rejected | Admitted) → (Published | PublishFailed)`.
//! Terminal states are `Rejected`, `Published`, and `PublishFailed`; a
//! submission never re-enters `Received`. The caller is told truthfully
//! whether the handoff happened.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use types::ids::ReferenceId;
use types::submission::AdmittedSubmission;

use crate::allocator::{AllocationError, ReferenceAllocator};
use crate::backpressure::{InFlightLimiter, InFlightPermit};
use crate::config::{GatewayConfig, RetryConfig};
use crate::ledger::ReferenceLedger;
use crate::metrics::IntakeMetrics;
use crate::models::IngestRequest;
use crate::queue::{OutboundQueue, PublishError};
use crate::validator::{self, ValidationError};

/// Terminal failure of an admission attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("in-flight publish capacity exhausted")]
    Overloaded,

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("publish failed for {reference}: {source}")]
    PublishFailed {
        reference: ReferenceId,
        source: PublishError,
    },
}

/// Successful admission: the submission was durably handed off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
    pub reference: ReferenceId,
    pub admitted_at: DateTime<Utc>,
}

/// Admission timestamps are non-decreasing across successive admissions
/// in one process, even if the wall clock steps backwards.
#[derive(Debug, Default)]
struct AdmissionClock {
    last_micros: AtomicI64,
}

impl AdmissionClock {
    fn now(&self) -> DateTime<Utc> {
        let observed = Utc::now().timestamp_micros();
        let prev = self.last_micros.fetch_max(observed, Ordering::AcqRel);
        let stamp = observed.max(prev);
        DateTime::from_timestamp_micros(stamp).unwrap_or_else(Utc::now)
    }
}

/// The orchestrating component of the intake gateway.
///
/// Holds no cross-request lock; each admission's validate → allocate →
/// publish sequence is independent. The duplicate ledger and the in-flight
/// limiter are the only shared state.
pub struct AdmissionGate {
    allocator: ReferenceAllocator,
    ledger: Arc<ReferenceLedger>,
    limiter: Arc<InFlightLimiter>,
    queue: Arc<dyn OutboundQueue>,
    retry: RetryConfig,
    clock: AdmissionClock,
    metrics: Arc<IntakeMetrics>,
}

impl AdmissionGate {
    pub fn new(
        config: &GatewayConfig,
        queue: Arc<dyn OutboundQueue>,
        metrics: Arc<IntakeMetrics>,
    ) -> Self {
        Self {
            allocator: ReferenceAllocator::new(),
            ledger: Arc::new(ReferenceLedger::new(config.ledger.clone())),
            limiter: Arc::new(InFlightLimiter::new(config.max_in_flight)),
            queue,
            retry: config.retry.clone(),
            clock: AdmissionClock::default(),
            metrics,
        }
    }

    /// Admit a raw submission.
    ///
    /// Validation errors return without any downstream contact. Publish
    /// failures are retried within the configured policy; when the policy
    /// exhausts, the allocated reference is returned alongside the error so
    /// the caller can resubmit idempotently. The publish sequence runs on a
    /// spawned task, so a caller that disconnects mid-flight cannot orphan
    /// a half-done handoff.
    pub async fn admit(&self, raw: IngestRequest) -> Result<Admitted, AdmissionError> {
        self.metrics.record_received();

        let submission = validator::validate(raw, &self.ledger).map_err(|err| {
            self.metrics.record_validation_rejection();
            err
        })?;

        let reference = match submission.reference.clone() {
            Some(reference) => reference,
            None => self.allocator.allocate().map_err(|err| {
                self.metrics.record_allocation_failure();
                error!(%err, "Reference allocation failed");
                err
            })?,
        };

        let Some(permit) = InFlightLimiter::try_acquire(&self.limiter) else {
            self.metrics.record_overload_rejection();
            return Err(AdmissionError::Overloaded);
        };

        let admitted_at = self.clock.now();
        let admitted = submission.admit(reference.clone(), admitted_at);

        let publish = tokio::spawn(publish_with_retry(
            Arc::clone(&self.queue),
            self.retry.clone(),
            Arc::clone(&self.ledger),
            Arc::clone(&self.metrics),
            admitted,
            permit,
        ));

        match publish.await {
            Ok(Ok(())) => Ok(Admitted {
                reference,
                admitted_at,
            }),
            Ok(Err(source)) => Err(AdmissionError::PublishFailed { reference, source }),
            Err(join_err) => {
                error!(%join_err, reference = %reference, "Publish task failed");
                Err(AdmissionError::PublishFailed {
                    reference,
                    source: PublishError::Unavailable("publish task failed".to_string()),
                })
            }
        }
    }

    /// Shared duplicate-reference ledger.
    pub fn ledger(&self) -> &ReferenceLedger {
        &self.ledger
    }

    /// Publishes currently in flight.
    pub fn in_flight(&self) -> usize {
        self.limiter.in_flight()
    }
}

/// Drive one admitted submission to a terminal publish state.
///
/// Retries re-send the identical submission (same reference) so the
/// at-least-once queue can deduplicate downstream. The reference enters
/// the ledger only on success, which keeps resubmission after a publish
/// failure legal under the same reference.
async fn publish_with_retry(
    queue: Arc<dyn OutboundQueue>,
    retry: RetryConfig,
    ledger: Arc<ReferenceLedger>,
    metrics: Arc<IntakeMetrics>,
    submission: AdmittedSubmission,
    _permit: InFlightPermit,
) -> Result<(), PublishError> {
    let started = tokio::time::Instant::now();
    let mut attempt: u32 = 1;

    loop {
        metrics.record_publish_attempt();

        match queue.publish(&submission).await {
            Ok(_ack) => {
                ledger.record(&submission.reference);
                metrics.record_accepted();
                info!(
                    reference = %submission.reference,
                    kind = %submission.kind,
                    attempt,
                    "Submission published"
                );
                return Ok(());
            }
            Err(err) => {
                let backoff = retry
                    .base_backoff
                    .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
                    .min(retry.max_backoff);

                let within_policy = attempt < retry.max_attempts
                    && started.elapsed() + backoff < retry.total_budget;

                if err.is_retryable() && within_policy {
                    warn!(
                        reference = %submission.reference,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        %err,
                        "Publish failed, retrying"
                    );
                    metrics.record_publish_retry();
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    continue;
                }

                metrics.record_publish_failure();
                error!(
                    reference = %submission.reference,
                    attempts = attempt,
                    %err,
                    "Publish failed, policy exhausted"
                );
                return Err(err);
            }
        }
    }
}
