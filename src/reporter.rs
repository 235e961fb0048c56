// Reporting and output for pathfuzz
//
// The reporter is the only component that writes to the reporting sink.
// Workers send outcomes over a channel and a single reporter task owns the
// counters, so completion notifications never race on shared state.

use crate::models::{Classification, Outcome, ParsedBody, RunStats};
use chrono::Local;
use std::fs::File;
use std::io::Write;
use tokio::sync::mpsc;

/// One completion notification from a worker.
#[derive(Debug)]
pub enum ReportEvent {
    Outcome(Outcome),
    /// A candidate rejected before any request was sent.
    Invalid { token: String, reason: String },
}

/// Cloneable sender handed to each worker.
pub type ReportSender = mpsc::Sender<ReportEvent>;

pub struct Reporter {
    rx: mpsc::Receiver<ReportEvent>,
    stats: RunStats,
    csv_report: bool,
    outcomes: Vec<Outcome>,
}

impl Reporter {
    pub fn new(csv_report: bool) -> (ReportSender, Self) {
        let (tx, rx) = mpsc::channel(64);
        (
            tx,
            Self {
                rx,
                stats: RunStats::default(),
                csv_report,
                outcomes: Vec::new(),
            },
        )
    }

    /// Consume events until every sender is dropped, then emit the final
    /// summary. Events arrive in completion order, not submission order;
    /// the summary counts are the only ordering-stable output.
    pub async fn run(mut self) -> RunStats {
        while let Some(event) = self.rx.recv().await {
            match event {
                ReportEvent::Outcome(outcome) => {
                    self.stats.record(&outcome);
                    self.emit_line(&outcome);
                    if self.csv_report {
                        self.outcomes.push(outcome);
                    }
                }
                ReportEvent::Invalid { token, reason } => {
                    self.stats.record_invalid();
                    log::warn!("skipping invalid candidate {:?}: {}", token, reason);
                }
            }
        }

        println!("summary: {}", self.stats);

        if self.csv_report {
            match export_csv(&self.outcomes) {
                Ok(filename) => println!("report written to {}", filename),
                Err(e) => log::error!("failed to write CSV report: {}", e),
            }
        }

        self.stats
    }

    /// Found outcomes are emitted immediately for interactive feedback;
    /// failures are reported once, at attempt exhaustion, with their last
    /// cause. Misses are only counted.
    fn emit_line(&self, outcome: &Outcome) {
        match outcome.classification {
            Classification::Found => {
                let status = outcome.status.unwrap_or(0);
                match &outcome.body {
                    Some(ParsedBody::Json(value)) => {
                        println!("[FOUND] {} {} {}", outcome.candidate, status, value)
                    }
                    Some(ParsedBody::ParseFailure) => {
                        println!(
                            "[FOUND] {} {} (unparseable structured body)",
                            outcome.candidate, status
                        )
                    }
                    None => println!("[FOUND] {} {}", outcome.candidate, status),
                }
            }
            Classification::NotFound => {}
            Classification::Timeout => {
                println!(
                    "[TIMEOUT] {}: {}",
                    outcome.candidate,
                    outcome.cause.as_deref().unwrap_or("timed out")
                )
            }
            Classification::Error => {
                let detail = match (&outcome.cause, outcome.status) {
                    (Some(cause), _) => cause.clone(),
                    (None, Some(status)) => format!("status {}", status),
                    (None, None) => "unknown error".to_string(),
                };
                println!("[ERROR] {}: {}", outcome.candidate, detail)
            }
        }
    }
}

/// Escape a CSV field, guarding against spreadsheet formula injection.
fn escape_csv_field(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }

    let first_char = field.chars().next().unwrap();
    let formula_prefix = matches!(first_char, '=' | '+' | '-' | '@' | '\t');

    if formula_prefix {
        format!("\"'{}\"", field.replace('"', "\"\""))
    } else if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write all outcomes to a timestamped CSV file in the working directory.
pub fn export_csv(outcomes: &[Outcome]) -> Result<String, std::io::Error> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("pathfuzz_report_{}.csv", timestamp);
    let mut file = File::create(&filename)?;

    writeln!(file, "Candidate,Status,Classification,Detail")?;
    for outcome in outcomes {
        let status = outcome
            .status
            .map(|s| s.to_string())
            .unwrap_or_default();
        let detail = match (&outcome.body, &outcome.cause) {
            (Some(ParsedBody::Json(value)), _) => value.to_string(),
            (Some(ParsedBody::ParseFailure), _) => "unparseable structured body".to_string(),
            (None, Some(cause)) => cause.clone(),
            (None, None) => String::new(),
        };
        writeln!(
            file,
            "{},{},{},{}",
            escape_csv_field(&outcome.candidate.token),
            escape_csv_field(&status),
            escape_csv_field(&outcome.classification.to_string()),
            escape_csv_field(&detail)
        )?;
    }

    Ok(filename)
}
