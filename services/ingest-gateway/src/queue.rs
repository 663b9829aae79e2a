//! Outbound queue collaborator
//!
//! The pipeline queue is external to this service; only its publish
//! contract lives here. Delivery is assumed at-least-once, so the gate
//! re-sends the same admitted submission (same reference) on retry and
//! downstream consumers can deduplicate on `reference`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use types::submission::AdmittedSubmission;

/// Acknowledgment of a durable handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishAck;

/// Publish failure taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("queue unavailable: {0}")]
    Unavailable(String),

    #[error("queue over capacity")]
    OverCapacity,

    #[error("queue rejected submission: {0}")]
    Rejected(String),
}

impl PublishError {
    /// Whether a retry with the same submission can succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) | Self::OverCapacity => true,
            Self::Rejected(_) => false,
        }
    }
}

/// Publish contract of the downstream pipeline queue.
#[async_trait]
pub trait OutboundQueue: Send + Sync {
    async fn publish(&self, submission: &AdmittedSubmission) -> Result<PublishAck, PublishError>;
}

/// HTTP-backed queue client: JSON POST of the admitted submission to the
/// pipeline intake endpoint.
pub struct HttpQueueClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQueueClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl OutboundQueue for HttpQueueClient {
    async fn publish(&self, submission: &AdmittedSubmission) -> Result<PublishAck, PublishError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| PublishError::Unavailable(format!("queue request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            debug!(
                reference = %submission.reference,
                "Queue acknowledged submission"
            );
            return Ok(PublishAck);
        }

        if status.as_u16() == 429 {
            return Err(PublishError::OverCapacity);
        }
        if status.is_server_error() {
            return Err(PublishError::Unavailable(format!("queue status {}", status)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(PublishError::Rejected(format!(
            "status {}: {}",
            status, body
        )))
    }
}
