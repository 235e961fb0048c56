// Error taxonomy for pathfuzz
//
// Per-candidate failures are recovered locally and never abort the run;
// only configuration failures do, before any candidate is processed.

use thiserror::Error;

/// Configuration-level failures. These are the only errors that abort the
/// run, and they surface before the first candidate is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed base URL {url:?}: {source}")]
    BadBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("cannot read wordlist {path:?}: {source}")]
    UnreadableWordlist {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A candidate that cannot form a well-formed URL path segment.
///
/// Skipped with a warning and counted separately; never reaches the
/// dispatcher and is never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid candidate {token:?}: {reason}")]
pub struct InvalidCandidate {
    pub token: String,
    pub reason: String,
}

impl InvalidCandidate {
    pub fn new(token: &str, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
