// Candidate source for pathfuzz
//
// Lazy line-delimited stream of candidates. Finite if the underlying
// stream is finite; never imposes a limit of its own. Once exhausted it is
// closed and yields nothing further.

use crate::error::ConfigError;
use crate::models::Candidate;
use tokio::io::{AsyncRead, AsyncBufReadExt, BufReader, Lines};

pub struct CandidateSource {
    lines: Lines<BufReader<Box<dyn AsyncRead + Send + Unpin>>>,
}

impl CandidateSource {
    /// Open a wordlist file. Fails up front so an unreadable input aborts
    /// the run before any candidate is processed.
    pub async fn from_path(path: &str) -> Result<Self, ConfigError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| ConfigError::UnreadableWordlist {
                path: path.to_string(),
                source,
            })?;
        Ok(Self::from_reader(file))
    }

    /// Read candidates from the inherited stdin stream.
    pub fn from_stdin() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    pub fn from_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        let boxed: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: BufReader::new(boxed).lines(),
        }
    }

    /// Yield the next candidate, skipping blank lines, or `None` at
    /// end-of-input. A read error mid-stream closes the source.
    pub async fn next_candidate(&mut self) -> Option<Candidate> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(candidate) = Candidate::from_line(&line) {
                        return Some(candidate);
                    }
                }
                Ok(None) => return None,
                Err(e) => {
                    log::warn!("wordlist read failed, closing source: {}", e);
                    return None;
                }
            }
        }
    }
}
