//! Ledgerview reporter
//!
//! Computes one ledger report from a JSON snapshot file and prints it as JSON.
//!
//! Usage:
//!   ledgerview snapshot <org-id>                          - Cumulative report
//!   ledgerview monthly <org-id>                           - One report per month
//!   ledgerview range <org-id> --start <date> --end <date> - Date range report
//!   ledgerview all                                        - Cumulative report of every organization

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerview_core::ledger::{InMemorySnapshotSource, Organization, SnapshotPolicy};
use ledgerview_core::reports::ReportEngine;
use ledgerview_shared::types::OrganizationId;
use ledgerview_shared::{AppConfig, AppError, AppResult};

#[derive(Debug, Parser)]
#[command(name = "ledgerview")]
#[command(about = "Compute ledger reports from an organization snapshot file")]
#[command(version)]
struct Cli {
    /// Snapshot file: a JSON array of organizations (defaults to `snapshot.path` from config)
    #[arg(long, short = 's', global = true)]
    snapshot: Option<PathBuf>,

    /// Include private sub-accounts (elevated callers only)
    #[arg(long, global = true)]
    include_private: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cumulative report of an organization
    Snapshot {
        /// Organization ID
        organization: OrganizationId,
    },
    /// One report per calendar month present in the ledger
    Monthly {
        /// Organization ID
        organization: OrganizationId,
    },
    /// Report restricted to an inclusive date window
    Range {
        /// Organization ID
        organization: OrganizationId,
        /// First day (YYYY-MM-DD or RFC 3339; time of day is dropped)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Last day (YYYY-MM-DD or RFC 3339; time of day is dropped)
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
    },
    /// Cumulative report of every organization in the snapshot
    All,
}

/// Parses a calendar date, normalizing timestamps to their date.
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|ts| ts.date_naive()))
        .map_err(|_| format!("'{value}' is not a valid date"))
}

fn load_snapshot(path: &Path) -> anyhow::Result<Vec<Organization>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

fn load_config() -> AppResult<AppConfig> {
    AppConfig::load().map_err(AppError::from)
}

fn run(
    engine: &ReportEngine<InMemorySnapshotSource>,
    command: Command,
    include_private: bool,
) -> AppResult<serde_json::Value> {
    let value = match command {
        Command::Snapshot { organization } => {
            serde_json::to_value(engine.snapshot_report(organization, include_private)?)
        }
        Command::Monthly { organization } => {
            serde_json::to_value(engine.monthly_report(organization, include_private)?)
        }
        Command::Range {
            organization,
            start,
            end,
        } => serde_json::to_value(engine.date_range_report(
            organization,
            include_private,
            start,
            end,
        )?),
        Command::All => {
            let ids = engine.source().organization_ids().to_vec();
            let reports = engine
                .snapshot_reports(&ids, include_private)
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;
            serde_json::to_value(reports)
        }
    };
    value.map_err(|e| AppError::Internal(format!("Failed to serialize report: {e}")))
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config()?;

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.snapshot.path));
    let organizations = load_snapshot(&path)?;
    info!(
        path = %path.display(),
        organizations = organizations.len(),
        "Snapshot loaded"
    );

    let policy = SnapshotPolicy {
        allow_negative_balance: config.reporting.allow_negative_balance,
    };
    let engine = ReportEngine::with_policy(InMemorySnapshotSource::new(organizations), policy);

    let report = match run(&engine, cli.command, cli.include_private) {
        Ok(report) => report,
        Err(err) => {
            error!(code = err.error_code(), status = err.status_code(), "{err}");
            std::process::exit(1);
        }
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
