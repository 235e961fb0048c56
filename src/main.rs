// Main CLI entry point for pathfuzz
// Uses clap for argument parsing

use clap::{Arg, Command};
use pathfuzz::config::ProbeConfig;
use pathfuzz::engine::ProbeEngine;
use pathfuzz::source::CandidateSource;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::collections::HashSet;
use std::time::Duration;

/// Parse a numeric flag, exiting with the configuration-error status on
/// malformed input.
fn parse_flag<T: std::str::FromStr>(name: &str, value: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for --{}: {}", name, value);
        std::process::exit(2);
    })
}

#[tokio::main]
async fn main() {
    let matches = Command::new("pathfuzz")
        .version("0.1.0")
        .about("Concurrent endpoint discovery probe for web services")
        .after_help("EXAMPLES:\n  pathfuzz --base-url http://target.test/ --wordlist common.txt\n  cat paths.txt | pathfuzz -b http://target.test/api --concurrency 16 --attempts 3\n  pathfuzz -b http://target.test/ -w common.txt --treat-as-found 401,403 --csv-report")
        .arg(Arg::new("base_url")
            .short('b')
            .long("base-url")
            .required(true)
            .num_args(1)
            .help("Base URL of the target; candidates are joined onto its path"))
        .arg(Arg::new("wordlist")
            .short('w')
            .long("wordlist")
            .num_args(1)
            .help("Path to a line-delimited wordlist (default: stdin)"))
        .arg(Arg::new("concurrency")
            .short('c')
            .long("concurrency")
            .num_args(1)
            .default_value("8")
            .help("Maximum requests simultaneously in flight"))
        .arg(Arg::new("attempts")
            .long("attempts")
            .num_args(1)
            .default_value("1")
            .help("Requests per candidate; retries apply to transient failures only"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .num_args(1)
            .default_value("5")
            .help("Per-request timeout in seconds"))
        .arg(Arg::new("backoff_base")
            .long("backoff-base")
            .num_args(1)
            .default_value("200")
            .help("First retry delay in milliseconds"))
        .arg(Arg::new("backoff_max")
            .long("backoff-max")
            .num_args(1)
            .default_value("5000")
            .help("Retry delay cap in milliseconds"))
        .arg(Arg::new("treat_as_found")
            .long("treat-as-found")
            .num_args(1)
            .help("Comma-separated status codes to classify as found (e.g. 401,403)"))
        .arg(Arg::new("csv_report")
            .long("csv-report")
            .action(clap::ArgAction::SetTrue)
            .help("Write a timestamped CSV report of all outcomes"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(clap::ArgAction::SetTrue)
            .help("Log retry attempts and skipped candidates"))
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let _ = TermLogger::init(
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        },
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let base_url = matches.get_one::<String>("base_url").expect("base_url is required");

    let treat_as_found: HashSet<u16> = matches
        .get_one::<String>("treat_as_found")
        .map(|list| {
            list.split(',')
                .map(|code| parse_flag("treat-as-found", code.trim()))
                .collect()
        })
        .unwrap_or_default();

    let config = ProbeConfig {
        base_url: base_url.clone(),
        max_concurrency: parse_flag(
            "concurrency",
            matches.get_one::<String>("concurrency").expect("has default"),
        ),
        max_attempts: parse_flag(
            "attempts",
            matches.get_one::<String>("attempts").expect("has default"),
        ),
        request_timeout: Duration::from_secs(parse_flag(
            "timeout",
            matches.get_one::<String>("timeout").expect("has default"),
        )),
        backoff_base: Duration::from_millis(parse_flag(
            "backoff-base",
            matches.get_one::<String>("backoff_base").expect("has default"),
        )),
        backoff_max: Duration::from_millis(parse_flag(
            "backoff-max",
            matches.get_one::<String>("backoff_max").expect("has default"),
        )),
        treat_as_found,
        csv_report: matches.get_flag("csv_report"),
    };

    // Both of these fail only for configuration reasons, before any
    // candidate is processed.
    let engine = ProbeEngine::new(config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(2);
    });

    let source = match matches.get_one::<String>("wordlist") {
        Some(path) => CandidateSource::from_path(path).await.unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(2);
        }),
        None => CandidateSource::from_stdin(),
    };

    let cancel = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, finishing in-flight work");
            cancel.cancel();
        }
    });

    match engine.run(source).await {
        // Per-candidate failures never abort the run; reaching the summary
        // is success regardless of how many candidates were found.
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}
