/// Unit tests for core pathfuzz modules
/// Tests models, counters, and helper behavior
use pathfuzz::models::{Candidate, Classification, Outcome, ParsedBody, RunStats};

fn outcome(classification: Classification) -> Outcome {
    Outcome {
        candidate: Candidate {
            token: "admin".to_string(),
        },
        classification,
        status: Some(200),
        body: None,
        cause: None,
    }
}

#[test]
fn test_candidate_from_line_trims_whitespace() {
    let candidate = Candidate::from_line("  admin  ").unwrap();
    assert_eq!(candidate.token, "admin");
}

#[test]
fn test_candidate_from_blank_line_is_none() {
    assert!(Candidate::from_line("").is_none());
    assert!(Candidate::from_line("   ").is_none());
    assert!(Candidate::from_line("\t").is_none());
}

#[test]
fn test_classification_display() {
    assert_eq!(Classification::Found.to_string(), "FOUND");
    assert_eq!(Classification::NotFound.to_string(), "NOT_FOUND");
    assert_eq!(Classification::Error.to_string(), "ERROR");
    assert_eq!(Classification::Timeout.to_string(), "TIMEOUT");
}

#[test]
fn test_run_stats_records_each_classification() {
    let mut stats = RunStats::default();
    stats.record(&outcome(Classification::Found));
    stats.record(&outcome(Classification::NotFound));
    stats.record(&outcome(Classification::Error));

    assert_eq!(stats.attempted, 3);
    assert_eq!(stats.found, 1);
    assert_eq!(stats.not_found, 1);
    assert_eq!(stats.errored, 1);
}

#[test]
fn test_run_stats_counts_timeout_as_errored() {
    // The summary has no separate timeout counter; the per-candidate
    // line keeps the distinction.
    let mut stats = RunStats::default();
    stats.record(&outcome(Classification::Timeout));

    assert_eq!(stats.attempted, 1);
    assert_eq!(stats.errored, 1);
    assert_eq!(stats.found, 0);
}

#[test]
fn test_run_stats_invalid_is_counted_separately() {
    let mut stats = RunStats::default();
    stats.record_invalid();
    stats.record(&outcome(Classification::Found));

    assert_eq!(stats.invalid, 1);
    assert_eq!(stats.attempted, 1);
}

#[test]
fn test_run_stats_summary_format() {
    let mut stats = RunStats::default();
    stats.record(&outcome(Classification::Found));
    stats.record(&outcome(Classification::Found));
    stats.record(&outcome(Classification::NotFound));

    assert_eq!(
        stats.to_string(),
        "{attempted:3, found:2, notFound:1, error:0, invalid:0}"
    );
}

#[test]
fn test_summary_counts_are_order_independent() {
    // Outcomes arrive in completion order, which is unspecified across
    // workers; folding them in any order gives the same counters.
    let outcomes = [
        outcome(Classification::Found),
        outcome(Classification::NotFound),
        outcome(Classification::Error),
        outcome(Classification::Found),
    ];

    let mut forward = RunStats::default();
    for o in &outcomes {
        forward.record(o);
    }
    let mut reverse = RunStats::default();
    for o in outcomes.iter().rev() {
        reverse.record(o);
    }

    assert_eq!(forward, reverse);
}

#[test]
fn test_parse_failure_marker_is_distinct_from_a_value() {
    let parsed = ParsedBody::Json(serde_json::json!({"ok": true}));
    assert_ne!(parsed, ParsedBody::ParseFailure);
}

#[test]
fn test_outcome_clone() {
    let original = outcome(Classification::Found);
    let copied = original.clone();
    assert_eq!(copied.candidate, original.candidate);
    assert_eq!(copied.classification, original.classification);
}
