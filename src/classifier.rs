// Response classifier for pathfuzz
//
// Pure function from (status, content-type, body) to a classification and
// optional structured body. Retry policy lives in the dispatcher; by the
// time a response reaches here it is terminal.

use crate::models::{Classification, ParsedBody};
use serde_json::Value;
use std::collections::HashSet;

/// True when the declared content type carries structured JSON data.
fn is_structured(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Classify a terminal response.
///
/// 2xx with a structured content type parses the body; a parse failure is
/// still `Found`, carrying a marker instead of a value. 404 is always
/// `NotFound`. Other 4xx default to `Error` unless listed in
/// `treat_as_found` (e.g. 403 for a protected but existing resource).
pub fn classify(
    status: u16,
    content_type: Option<&str>,
    body: &str,
    treat_as_found: &HashSet<u16>,
) -> (Classification, Option<ParsedBody>) {
    match status {
        200..=299 => match content_type {
            Some(ct) if is_structured(ct) => match serde_json::from_str::<Value>(body) {
                Ok(value) => (Classification::Found, Some(ParsedBody::Json(value))),
                Err(_) => (Classification::Found, Some(ParsedBody::ParseFailure)),
            },
            _ => (Classification::Found, None),
        },
        300..=399 => (Classification::Found, None),
        404 => (Classification::NotFound, None),
        s if treat_as_found.contains(&s) => (Classification::Found, None),
        _ => (Classification::Error, None),
    }
}
