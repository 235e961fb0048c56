// Async HTTP dispatcher for pathfuzz
//
// Owns the network I/O lifecycle: shared reqwest client, per-request
// timeout, and a bounded retry loop. The original behavior this replaces
// recursed on every miss without bound; here each candidate gets at most
// `max_attempts` requests, retried only on transient failures, and the
// attempts for one candidate run strictly in sequence.

use crate::config::ProbeConfig;
use crate::error::ConfigError;
use crate::models::RequestDescriptor;
use rand::Rng;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A response body read to completion, ready for classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Terminal result of dispatching one candidate.
#[derive(Debug)]
pub enum DispatchResult {
    /// A response arrived within the attempt budget.
    Response(RawResponse),
    /// All attempts failed on transient errors.
    Exhausted { timed_out: bool, cause: String },
    /// The run was cancelled before a terminal result.
    Cancelled,
}

pub struct Dispatcher {
    pub client: Client,
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
    cancel: CancellationToken,
}

impl Dispatcher {
    pub fn new(config: &ProbeConfig, cancel: CancellationToken) -> Result<Self, ConfigError> {
        let client = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self {
            client,
            max_attempts: config.max_attempts.max(1),
            backoff_base: config.backoff_base,
            backoff_max: config.backoff_max,
            cancel,
        })
    }

    /// Send the request, retrying transient failures (network error,
    /// timeout, 5xx) with exponential backoff and jitter up to the attempt
    /// budget. A 404 or any other definitive response returns immediately.
    /// Cancellation is honored at every suspension point.
    pub async fn dispatch(&self, descriptor: &RequestDescriptor) -> DispatchResult {
        let mut delay = self.backoff_base;
        let mut last_cause = String::new();
        let mut last_was_timeout = false;

        for attempt in 1..=self.max_attempts {
            if self.cancel.is_cancelled() {
                return DispatchResult::Cancelled;
            }

            let sent = tokio::select! {
                _ = self.cancel.cancelled() => return DispatchResult::Cancelled,
                result = self.send_once(descriptor) => result,
            };

            match sent {
                Ok(raw) => {
                    // 5xx is transient while attempts remain; on the final
                    // attempt the response goes to the classifier as-is.
                    if raw.status >= 500 && attempt < self.max_attempts {
                        last_cause = format!("server error {}", raw.status);
                        last_was_timeout = false;
                        log::debug!(
                            "attempt {}/{} for {} returned {}, retrying",
                            attempt,
                            self.max_attempts,
                            descriptor.url,
                            raw.status
                        );
                    } else {
                        return DispatchResult::Response(raw);
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_was_timeout = true;
                    last_cause = format!("no response within {:?}", descriptor.timeout);
                    log::debug!(
                        "attempt {}/{} for {} timed out",
                        attempt,
                        self.max_attempts,
                        descriptor.url
                    );
                }
                Err(e) => {
                    last_was_timeout = false;
                    last_cause = e.to_string();
                    log::debug!(
                        "attempt {}/{} for {} failed: {}",
                        attempt,
                        self.max_attempts,
                        descriptor.url,
                        e
                    );
                }
            }

            if attempt < self.max_attempts {
                let pause = with_jitter(delay);
                tokio::select! {
                    _ = self.cancel.cancelled() => return DispatchResult::Cancelled,
                    _ = tokio::time::sleep(pause) => {}
                }
                delay = std::cmp::min(delay * 2, self.backoff_max);
            }
        }

        DispatchResult::Exhausted {
            timed_out: last_was_timeout,
            cause: last_cause,
        }
    }

    async fn send_once(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, reqwest::Error> {
        let response = self
            .client
            .request(descriptor.method.clone(), descriptor.url.clone())
            .timeout(descriptor.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Add up to 25% random jitter so synchronized retries do not stampede.
fn with_jitter(delay: Duration) -> Duration {
    let base_ms = delay.as_millis() as u64;
    let jitter_ms = {
        let mut rng = rand::thread_rng();
        rng.gen_range(0..=(base_ms / 4).max(1))
    };
    delay + Duration::from_millis(jitter_ms)
}
