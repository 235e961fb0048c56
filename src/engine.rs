// Probe engine for pathfuzz
//
// Wires the pipeline together: a fixed pool of workers pulls candidates
// from the shared source and runs build -> dispatch -> classify -> report
// for each. The source is consumed under a mutex so every candidate is
// handed one worker; outbound load is bounded by the pool size.

use crate::builder::{build_request, parse_base_url};
use crate::classifier::classify;
use crate::config::ProbeConfig;
use crate::dispatcher::{DispatchResult, Dispatcher};
use crate::error::ConfigError;
use crate::models::{Classification, Outcome, RunStats};
use crate::reporter::{ReportEvent, ReportSender, Reporter};
use crate::source::CandidateSource;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use url::Url;

pub struct ProbeEngine {
    config: ProbeConfig,
    base_url: Url,
    cancel: CancellationToken,
}

impl ProbeEngine {
    /// Validate the configuration. Fails before any candidate is read.
    pub fn new(config: ProbeConfig) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&config.base_url)?;
        Ok(Self {
            config,
            base_url,
            cancel: CancellationToken::new(),
        })
    }

    /// Token for cancelling the run from outside (e.g. a ctrl-c handler).
    /// Cancellation stops new requests at the next suspension point;
    /// outcomes already committed to the reporter are kept.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drive the source to exhaustion (or cancellation) and return the
    /// final counters.
    pub async fn run(&self, source: CandidateSource) -> Result<RunStats, ConfigError> {
        let dispatcher = Arc::new(Dispatcher::new(&self.config, self.cancel.clone())?);
        let source = Arc::new(Mutex::new(source));
        let treat_as_found = Arc::new(self.config.treat_as_found.clone());

        let (tx, reporter) = Reporter::new(self.config.csv_report);
        let reporter_task = tokio::spawn(reporter.run());

        let mut workers = Vec::with_capacity(self.config.max_concurrency);
        for _ in 0..self.config.max_concurrency.max(1) {
            workers.push(tokio::spawn(worker_loop(
                Arc::clone(&source),
                self.base_url.clone(),
                self.config.request_timeout,
                Arc::clone(&dispatcher),
                Arc::clone(&treat_as_found),
                tx.clone(),
                self.cancel.clone(),
            )));
        }
        // The reporter finishes once every worker's sender is dropped.
        drop(tx);

        for worker in workers {
            let _ = worker.await;
        }

        let stats = reporter_task.await.unwrap_or_default();
        Ok(stats)
    }
}

/// One worker: pull candidates until the source is exhausted or the run is
/// cancelled. Every valid candidate produces exactly one report event.
async fn worker_loop(
    source: Arc<Mutex<CandidateSource>>,
    base_url: Url,
    timeout: Duration,
    dispatcher: Arc<Dispatcher>,
    treat_as_found: Arc<HashSet<u16>>,
    tx: ReportSender,
    cancel: CancellationToken,
) {
    loop {
        if cancel.is_cancelled() {
            return;
        }

        let candidate = {
            let mut source = source.lock().await;
            source.next_candidate().await
        };
        let Some(candidate) = candidate else { return };

        let descriptor = match build_request(&base_url, &candidate, timeout) {
            Ok(descriptor) => descriptor,
            Err(invalid) => {
                let _ = tx
                    .send(ReportEvent::Invalid {
                        token: invalid.token,
                        reason: invalid.reason,
                    })
                    .await;
                continue;
            }
        };

        let outcome = match dispatcher.dispatch(&descriptor).await {
            DispatchResult::Response(raw) => {
                let (classification, body) =
                    classify(raw.status, raw.content_type.as_deref(), &raw.body, &treat_as_found);
                Outcome {
                    candidate,
                    classification,
                    status: Some(raw.status),
                    body,
                    cause: None,
                }
            }
            DispatchResult::Exhausted { timed_out, cause } => Outcome {
                candidate,
                classification: if timed_out {
                    Classification::Timeout
                } else {
                    Classification::Error
                },
                status: None,
                body: None,
                cause: Some(cause),
            },
            // No outcome for an aborted in-flight candidate; the summary
            // reflects only completed work.
            DispatchResult::Cancelled => return,
        };

        let _ = tx.send(ReportEvent::Outcome(outcome)).await;
    }
}
