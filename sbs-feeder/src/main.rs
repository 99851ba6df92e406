//! sbs: decode BaseStation (SBS-1) feed captures.
//!
//! Supports:
//! - Printing every decoded message (debug or JSON lines)
//! - Summarising a capture as an aircraft table
//!
//! Reading a live receiver socket is the job of the ingestion service, not
//! this tool; pipe `nc` into `sbs decode -` for a quick look at a live feed.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sbs_core::config::{self, Config};
use sbs_core::{decode_with, MessageFilter};

mod capture;
mod summary;

#[derive(Parser)]
#[command(name = "sbs", version, about = "BaseStation (SBS-1) feed decoder")]
struct Cli {
    /// Config file (defaults to ~/.sbs-decode/config.yaml)
    #[arg(long, global = true, env = "SBS_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode SBS lines from a file and print an aircraft table
    Decode {
        /// Path to file containing SBS lines (one per line), `-` for stdin
        file: PathBuf,

        /// Show raw decoded messages instead of summary table
        #[arg(short, long, conflicts_with = "json")]
        raw: bool,

        /// Print one JSON object per decoded message
        #[arg(long)]
        json: bool,

        /// Stop at the first structurally invalid line
        #[arg(long)]
        strict: bool,
    },
}

/// Line outcome counts for one run.
#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    read: u64,
    decoded: u64,
    skipped: u64,
    rejected: u64,
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Decode {
            file,
            raw,
            json,
            strict,
        } => cmd_decode(file, raw, json, strict, &config),
    }
}

fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 => config.logging.level.clone(),
        1 => "info".into(),
        2 => "debug".into(),
        _ => "trace".into(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn cmd_decode(file: PathBuf, raw: bool, json: bool, strict: bool, config: &Config) {
    let reader = capture::LineReader::open(&file).unwrap_or_else(|e| {
        eprintln!("Error opening {}: {e}", file.display());
        std::process::exit(1);
    });

    let filter = config.allow_list();
    let mut summary = summary::Summary::default();
    let mut counts = Counts::default();

    for line in reader.lines() {
        let (line_no, line) = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading {}: {e}", file.display());
                std::process::exit(1);
            }
        };

        match decode_line(line_no, &line, &filter, &mut counts) {
            Ok(Some(msg)) => {
                if json {
                    match serde_json::to_string(&msg) {
                        Ok(text) => println!("{text}"),
                        Err(e) => warn!(error = %e, "failed to serialize message"),
                    }
                } else if raw {
                    println!("{msg:?}");
                } else {
                    summary.update(&msg);
                }
            }
            Ok(None) => {}
            Err(e) => {
                if strict {
                    eprintln!("Error at line {line_no}: {e}");
                    std::process::exit(2);
                }
            }
        }
    }

    if !raw && !json {
        print_summary(&summary, &counts);
    } else {
        debug!(?counts, "decode finished");
    }
}

/// Decode one line and record its outcome. Structural errors are logged with
/// the input line number and handed back so the caller can decide whether to
/// stop.
fn decode_line(
    line_no: usize,
    line: &str,
    filter: &dyn MessageFilter,
    counts: &mut Counts,
) -> sbs_core::Result<Option<sbs_core::BaseStationMessage>> {
    counts.read += 1;
    let outcome = decode_with(line, filter);
    match &outcome {
        Ok(Some(msg)) => {
            counts.decoded += 1;
            debug!(icao = msg.icao_address(), kind = %msg.kind(), "decoded");
        }
        Ok(None) => counts.skipped += 1,
        Err(e) => {
            counts.rejected += 1;
            warn!(line = line_no, error = %e, "rejected line");
        }
    }
    outcome
}

fn print_summary(summary: &summary::Summary, counts: &Counts) {
    println!();
    println!(
        "Lines: {} read, {} decoded, {} skipped, {} rejected, {} aircraft",
        counts.read,
        counts.decoded,
        counts.skipped,
        counts.rejected,
        summary.aircraft.len()
    );
    println!();

    if summary.aircraft.is_empty() {
        return;
    }

    println!("{}", summary.table());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sbs_core::AllowList;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decode_args() {
        let cli = Cli::try_parse_from(["sbs", "-vv", "decode", "capture.sbs", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Decode {
                file, json, raw, ..
            } => {
                assert_eq!(file, PathBuf::from("capture.sbs"));
                assert!(json);
                assert!(!raw);
            }
        }
        assert!(Cli::try_parse_from(["sbs", "decode", "x", "--raw", "--json"]).is_err());
    }

    #[test]
    fn test_decode_line_counts() {
        let filter = AllowList::default();
        let mut counts = Counts::default();
        let lines = [
            "AIR,,111,11111,4CA2D6,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288",
            "SEL,,111,11111,4CA2D6,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288,X",
            "MSG,3,111,11111,4CA2D6",
        ];
        for (idx, line) in lines.into_iter().enumerate() {
            let _ = decode_line(idx + 1, line, &filter, &mut counts);
        }
        assert_eq!(
            counts,
            Counts {
                read: 3,
                decoded: 1,
                skipped: 1,
                rejected: 1
            }
        );
    }
}
