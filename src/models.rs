// Core data models for pathfuzz

use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

/// A single path token under test against the target service.
///
/// Created when read from the input stream, consumed exactly once by the
/// request builder, discarded after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub token: String,
}

impl Candidate {
    /// Build a candidate from one input line. Surrounding whitespace is
    /// stripped; blank lines yield `None` and are skipped by the source.
    pub fn from_line(line: &str) -> Option<Self> {
        let token = line.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self {
                token: token.to_string(),
            })
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// A fully qualified request, immutable once built.
///
/// The method is fixed to GET; the probe never issues anything else.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: Url,
    pub method: reqwest::Method,
    pub timeout: Duration,
}

/// Terminal classification for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Found,
    NotFound,
    Error,
    Timeout,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Found => write!(f, "FOUND"),
            Classification::NotFound => write!(f, "NOT_FOUND"),
            Classification::Error => write!(f, "ERROR"),
            Classification::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

/// Structured body evidence attached to a `Found` outcome.
///
/// A malformed body from a live endpoint is still evidence the endpoint
/// exists, so parse failures are carried as a marker, never escalated.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Json(Value),
    ParseFailure,
}

/// The terminal classification and evidence for one candidate.
///
/// Every candidate entering the pipeline produces exactly one of these;
/// retries collapse into a single outcome.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub candidate: Candidate,
    pub classification: Classification,
    pub status: Option<u16>,
    pub body: Option<ParsedBody>,
    /// Last failure cause when attempts were exhausted.
    pub cause: Option<String>,
}

/// Process-wide counters, owned and mutated only by the reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub attempted: u64,
    pub found: u64,
    pub not_found: u64,
    pub errored: u64,
    pub invalid: u64,
}

impl RunStats {
    /// Fold one outcome into the counters. `Timeout` counts as errored;
    /// the per-candidate report line keeps the distinction.
    pub fn record(&mut self, outcome: &Outcome) {
        self.attempted += 1;
        match outcome.classification {
            Classification::Found => self.found += 1,
            Classification::NotFound => self.not_found += 1,
            Classification::Error | Classification::Timeout => self.errored += 1,
        }
    }

    /// Count a candidate rejected before any request was sent.
    pub fn record_invalid(&mut self) {
        self.invalid += 1;
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{attempted:{}, found:{}, notFound:{}, error:{}, invalid:{}}}",
            self.attempted, self.found, self.not_found, self.errored, self.invalid
        )
    }
}
