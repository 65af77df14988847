//! `revcycle` - revenue-cycle analytics reports from the command line
//!
//! Each subcommand reads a JSON array of claim records, coerces the rows at
//! the boundary, runs the requested computation, and prints the report as
//! pretty JSON on stdout. Ingest diagnostics go to the log, not the report.

use std::fs;
use std::path::{Path, PathBuf};

use analytics_engine::{
    claims_from_json, compute_aging_metrics, compute_status_distribution, records_from_json,
    revenue_summary, Claim,
};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "revcycle", version, about = "Revenue-cycle analytics reports")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Accounts receivable aging report
    Aging {
        /// JSON file containing an array of claim records
        #[arg(short, long)]
        input: PathBuf,

        /// Report date, defaults to today (UTC)
        #[arg(long, env = "REVCYCLE_AS_OF")]
        as_of: Option<NaiveDate>,
    },
    /// Claim status pipeline distribution
    Pipeline {
        /// JSON file containing an array of claim records
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Revenue summary for a service-date period
    Revenue {
        /// JSON file containing an array of claim records
        #[arg(short, long)]
        input: PathBuf,

        /// First service date of the period (inclusive)
        #[arg(long)]
        start: NaiveDate,

        /// Last service date of the period (inclusive)
        #[arg(long)]
        end: NaiveDate,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Aging { input, as_of } => {
            let claims = load_claims(&input)?;
            let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
            print_report(&compute_aging_metrics(&claims, as_of))
        }
        Command::Pipeline { input } => {
            // The distribution works on raw statuses so unrecognized codes
            // are reported under "other" instead of being dropped at ingest.
            let payload = read_payload(&input)?;
            let records = records_from_json(&payload)?;
            let statuses: Vec<String> = records
                .into_iter()
                .map(|r| r.status.unwrap_or_else(|| "unknown".to_string()))
                .collect();
            print_report(&compute_status_distribution(&statuses))
        }
        Command::Revenue { input, start, end } => {
            let claims = load_claims(&input)?;
            print_report(&revenue_summary(&claims, start, end)?)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ops_cli=debug,analytics_engine=debug"
    } else {
        "ops_cli=info,analytics_engine=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_claims(path: &Path) -> anyhow::Result<Vec<Claim>> {
    let payload = read_payload(path)?;
    let (claims, summary) = claims_from_json(&payload)?;
    info!(
        accepted = summary.accepted,
        skipped = summary.skipped,
        coerced_charges = summary.coerced_charges,
        "loaded claim records"
    );
    Ok(claims)
}

fn print_report<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
