use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::gate::AdmissionGate;
use crate::metrics::IntakeMetrics;
use crate::queue::{HttpQueueClient, OutboundQueue};

/// Explicitly constructed service context: admission gate, queue client,
/// and counters. Built once at startup, torn down at shutdown; no hidden
/// globals.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AdmissionGate>,
    pub metrics: Arc<IntakeMetrics>,
}

impl AppState {
    /// Wire the production context from configuration.
    pub fn new(config: &GatewayConfig) -> Self {
        let queue = Arc::new(HttpQueueClient::new(config.queue_endpoint.clone()));
        Self::with_queue(config, queue)
    }

    /// Wire a context around an explicit queue collaborator.
    pub fn with_queue(config: &GatewayConfig, queue: Arc<dyn OutboundQueue>) -> Self {
        let metrics = Arc::new(IntakeMetrics::new());
        let gate = Arc::new(AdmissionGate::new(config, queue, Arc::clone(&metrics)));
        Self { gate, metrics }
    }
}
