// Request builder for pathfuzz
//
// Pure join of a base URL and a candidate token: same inputs always yield
// the same descriptor or the same failure.

use crate::error::{ConfigError, InvalidCandidate};
use crate::models::{Candidate, RequestDescriptor};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::time::Duration;
use url::Url;

// Characters escaped inside a path segment. ':' is included so a token
// like "http://evil" cannot re-parse as an absolute URL when joined.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b':')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Parse and normalize the base target. The path is forced to end with a
/// slash so joined candidates extend it instead of replacing the last
/// segment.
pub fn parse_base_url(base: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(base).map_err(|source| ConfigError::BadBaseUrl {
        url: base.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Combine the base URL and a candidate into a request descriptor.
///
/// Tokens containing control characters, `.`/`..` path segments, or
/// anything that cannot form a well-formed path are rejected before the
/// dispatcher ever sees them.
pub fn build_request(
    base: &Url,
    candidate: &Candidate,
    timeout: Duration,
) -> Result<RequestDescriptor, InvalidCandidate> {
    let token = candidate.token.as_str();

    if token.chars().any(|c| c.is_control()) {
        return Err(InvalidCandidate::new(token, "contains control characters"));
    }

    // A leading slash would be interpreted as host-relative by Url::join
    // and escape the base path.
    let relative = token.trim_start_matches('/');
    if relative.is_empty() {
        return Err(InvalidCandidate::new(token, "empty path"));
    }
    if relative
        .split('/')
        .any(|segment| segment == ".." || segment == ".")
    {
        return Err(InvalidCandidate::new(
            token,
            "path traversal outside the target namespace",
        ));
    }

    let encoded = relative
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    let url = base
        .join(&encoded)
        .map_err(|e| InvalidCandidate::new(token, format!("not a valid URL path: {}", e)))?;

    // Namespace guard: whatever the join produced must still live under
    // the base target.
    if !url.as_str().starts_with(base.as_str()) {
        return Err(InvalidCandidate::new(
            token,
            "resolves outside the target namespace",
        ));
    }

    Ok(RequestDescriptor {
        url,
        method: reqwest::Method::GET,
        timeout,
    })
}
