//! Gateway configuration
//!
//! All tunables are explicit and passed by value at construction time; no
//! hidden globals. Defaults suit a single-node deployment and every knob can
//! be overridden through `GATEWAY_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

/// Retry policy for outbound publishes.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum publish attempts per admission (first try included).
    pub max_attempts: u32,
    /// Base delay for exponential backoff.
    pub base_backoff: Duration,
    /// Upper bound on a single backoff delay.
    pub max_backoff: Duration,
    /// Total wall-clock budget across all attempts.
    pub total_budget: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_millis(500),
            total_budget: Duration::from_secs(5),
        }
    }
}

/// Retention policy for the duplicate-reference ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// How long a published reference is remembered.
    pub retention: Duration,
    /// Hard cap on remembered references.
    pub capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(15 * 60),
            capacity: 100_000,
        }
    }
}

/// Top-level gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address for the HTTP boundary.
    pub bind_addr: SocketAddr,
    /// Endpoint of the downstream pipeline queue.
    pub queue_endpoint: String,
    /// Maximum concurrent in-flight publishes before fail-fast rejection.
    pub max_in_flight: usize,
    /// Outbound publish retry policy.
    pub retry: RetryConfig,
    /// Duplicate-reference ledger retention.
    pub ledger: LedgerConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            queue_endpoint: "http://localhost:8081/internal/pipeline/submissions".to_string(),
            max_in_flight: 256,
            retry: RetryConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `GATEWAY_BIND_ADDR`, `GATEWAY_QUEUE_ENDPOINT`,
    /// `GATEWAY_MAX_IN_FLIGHT`, `GATEWAY_PUBLISH_ATTEMPTS`,
    /// `GATEWAY_PUBLISH_BUDGET_MS`, `GATEWAY_LEDGER_RETENTION_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(addr) = env_parse::<SocketAddr>("GATEWAY_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(endpoint) = std::env::var("GATEWAY_QUEUE_ENDPOINT") {
            config.queue_endpoint = endpoint;
        }
        if let Some(max) = env_parse::<usize>("GATEWAY_MAX_IN_FLIGHT") {
            config.max_in_flight = max;
        }
        if let Some(attempts) = env_parse::<u32>("GATEWAY_PUBLISH_ATTEMPTS") {
            config.retry.max_attempts = attempts;
        }
        if let Some(budget_ms) = env_parse::<u64>("GATEWAY_PUBLISH_BUDGET_MS") {
            config.retry.total_budget = Duration::from_millis(budget_ms);
        }
        if let Some(retention_secs) = env_parse::<u64>("GATEWAY_LEDGER_RETENTION_SECS") {
            config.ledger.retention = Duration::from_secs(retention_secs);
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}
