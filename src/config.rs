// src/config.rs
// =============================================================================
// Settings that control a crawl run.
//
// The CLI fills these in from command-line flags; tests build them directly
// with the with_* methods.
// =============================================================================

use std::time::Duration;
use tokio::sync::Semaphore;

/// How many pages may be fetched at the same time by default
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// How long a single fetch may take by default
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Upper bound on in-flight fetches. Zero is treated as one, and values
    /// above what a tokio Semaphore can hold are capped.
    pub max_concurrency: usize,
    /// Deadline for each fetch, covering the request and the body read
    pub request_timeout: Duration,
}

impl CrawlConfig {
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    // A semaphore with zero permits would never admit anyone, and
    // Semaphore::new panics above MAX_PERMITS
    pub(crate) fn permits(&self) -> usize {
        self.max_concurrency.clamp(1, Semaphore::MAX_PERMITS)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
