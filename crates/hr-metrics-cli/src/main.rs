//! `hr-metrics` — command-line front end for the hr-metrics library.
//!
//! Single computations take their inputs as flags; the statistics commands
//! read a JSON array of API records from a file or stdin. Results are
//! printed as JSON on stdout, logs go to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{ArgAction, Args, Parser, Subcommand};
use hr_metrics::{
    aggregate, count_business_days, hours_between, minutes_late, summarize_lateness,
    summarize_time_records, AbsenceRecord, DateRange, LatenessRecord, TimeRecord,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hr-metrics", version, about = "HR calendar arithmetic and record statistics")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print single-line JSON instead of pretty-printed output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count Monday–Friday days between two dates, both included
    BusinessDays {
        /// Start date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        end: String,
    },
    /// Hours between an entry and an exit time on the same day
    Hours {
        /// Entry time (HH:MM)
        #[arg(long)]
        entry: String,
        /// Exit time (HH:MM)
        #[arg(long)]
        exit: String,
    },
    /// Minutes between a scheduled and an actual arrival
    Late {
        /// Scheduled arrival (HH:MM)
        #[arg(long)]
        scheduled: String,
        /// Actual arrival (HH:MM)
        #[arg(long)]
        actual: String,
    },
    /// Absence statistics from a JSON array of absence records
    Absences(StatsArgs),
    /// Hours-worked statistics from a JSON array of pointage records
    Pointage(StatsArgs),
    /// Lateness statistics from a JSON array of retard records
    Retards(StatsArgs),
}

#[derive(Args)]
struct StatsArgs {
    /// Reference year for "this year" totals [default: current year]
    #[arg(long)]
    year: Option<i32>,

    /// JSON input file; omit or pass `-` to read stdin
    input: Option<PathBuf>,
}

impl StatsArgs {
    /// The caller owns "now": the library never reads the clock.
    fn reference_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::BusinessDays { start, end } => {
            let range = DateRange::parse(start, end)?;
            let output = json!({
                "start": range.start.to_string(),
                "end": range.end.to_string(),
                "business_days": count_business_days(&range),
            });
            print_json(&output, cli.compact)
        }
        Command::Hours { entry, exit } => {
            let hours = hours_between(entry, exit)?;
            print_json(
                &json!({ "entry": entry, "exit": exit, "hours": hours }),
                cli.compact,
            )
        }
        Command::Late { scheduled, actual } => {
            let minutes = minutes_late(scheduled, actual)?;
            print_json(
                &json!({ "scheduled": scheduled, "actual": actual, "minutes_late": minutes }),
                cli.compact,
            )
        }
        Command::Absences(args) => {
            let records: Vec<AbsenceRecord> = read_records(args.input.as_deref(), "absence")?;
            print_json(&aggregate(&records, args.reference_year()), cli.compact)
        }
        Command::Pointage(args) => {
            let records: Vec<TimeRecord> = read_records(args.input.as_deref(), "pointage")?;
            print_json(
                &summarize_time_records(&records, args.reference_year()),
                cli.compact,
            )
        }
        Command::Retards(args) => {
            let records: Vec<LatenessRecord> = read_records(args.input.as_deref(), "retard")?;
            print_json(
                &summarize_lateness(&records, args.reference_year()),
                cli.compact,
            )
        }
    }
}

/// Read a JSON array of records from `path`, or stdin when absent or `-`.
fn read_records<T: DeserializeOwned>(path: Option<&Path>, kind: &str) -> Result<Vec<T>> {
    let raw = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let records: Vec<T> = serde_json::from_str(&raw)
        .with_context(|| format!("input is not a JSON array of {kind} records"))?;
    debug!(count = records.len(), kind, "loaded records");
    Ok(records)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}
