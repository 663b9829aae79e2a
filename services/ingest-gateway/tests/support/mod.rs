//! Queue doubles for gateway integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

use ingest_gateway::queue::{OutboundQueue, PublishAck, PublishError};
use types::submission::AdmittedSubmission;

/// Records every successful publish; fails the first `fail_first` calls
/// with a retryable error.
pub struct RecordingQueue {
    fail_first: AtomicU32,
    calls: AtomicU32,
    published: Mutex<Vec<AdmittedSubmission>>,
}

impl RecordingQueue {
    pub fn reliable() -> Self {
        Self::failing_first(0)
    }

    pub fn failing_first(fail_first: u32) -> Self {
        Self {
            fail_first: AtomicU32::new(fail_first),
            calls: AtomicU32::new(0),
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn recover(&self) {
        self.fail_first.store(0, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<AdmittedSubmission> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutboundQueue for RecordingQueue {
    async fn publish(&self, submission: &AdmittedSubmission) -> Result<PublishAck, PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(PublishError::Unavailable("queue down".to_string()));
        }
        self.published.lock().unwrap().push(submission.clone());
        Ok(PublishAck)
    }
}

/// Holds every publish until explicitly released, one per permit.
pub struct GatedQueue {
    entered: AtomicUsize,
    gate: Semaphore,
    published: Mutex<Vec<AdmittedSubmission>>,
}

impl GatedQueue {
    pub fn new() -> Self {
        Self {
            entered: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Publishes that have started (possibly still blocked).
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    /// Let `n` blocked publishes complete.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl OutboundQueue for GatedQueue {
    async fn publish(&self, submission: &AdmittedSubmission) -> Result<PublishAck, PublishError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| PublishError::Unavailable("queue closed".to_string()))?;
        // One release admits exactly one publish.
        permit.forget();
        self.published.lock().unwrap().push(submission.clone());
        Ok(PublishAck)
    }
}
