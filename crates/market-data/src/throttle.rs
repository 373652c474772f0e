//! Request pacing for scraping providers.
//!
//! The quote site rate-limits aggressive clients, so every outbound request
//! passes through a [`RequestGate`] that enforces a fixed minimum interval.
//! The interval is explicit configuration handed to the provider at
//! construction time rather than process-global state.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Configuration for an HTTP quote provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Minimum delay between two consecutive requests.
    pub request_interval: Duration,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            request_interval: Duration::from_millis(1000),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Serializes requests and spaces them at least `interval` apart.
pub struct RequestGate {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until the configured interval has elapsed since the previous
    /// request, then records the new request time. Holding the lock across
    /// the sleep also serializes concurrent callers.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
