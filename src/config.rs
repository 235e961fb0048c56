// Run configuration for pathfuzz

use std::collections::HashSet;
use std::time::Duration;

/// Everything a probe run needs, assembled once at startup and passed into
/// each component. There is no other global state.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Target URL prefix every candidate is joined onto.
    pub base_url: String,
    /// Upper bound on requests simultaneously in flight.
    pub max_concurrency: usize,
    /// Requests per candidate, counting the first. Retries apply only to
    /// transient failures, never to a definitive 404.
    pub max_attempts: u32,
    /// Per-request deadline; covers connect through body read.
    pub request_timeout: Duration,
    /// First retry delay; doubles per attempt up to `backoff_max`.
    pub backoff_base: Duration,
    pub backoff_max: Duration,
    /// Extra status codes classified as `Found` (e.g. 403 for a protected
    /// but existing resource). 404 stays `NotFound` regardless.
    pub treat_as_found: HashSet<u16>,
    /// Write a timestamped CSV report of all outcomes at run end.
    pub csv_report: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_concurrency: 8,
            max_attempts: 1,
            request_timeout: Duration::from_secs(5),
            backoff_base: Duration::from_millis(200),
            backoff_max: Duration::from_secs(5),
            treat_as_found: HashSet::new(),
            csv_report: false,
        }
    }
}

impl ProbeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
