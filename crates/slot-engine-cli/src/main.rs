//! `slots` CLI: query bookable slots and check bookings from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Open appointment slots for staff 1, service 1 on a date
//! slots available --schedule clinic.json --provider 1 --service 1 --date 2024-01-15
//!
//! # Same query rendered as a cleaning booking, on a 60-minute grid
//! slots available --schedule cleaners.json --provider 1 --service 2 \
//!     --date 2024-01-15 --domain cleaning
//!
//! # Override the grid step for one query
//! slots available --schedule clinic.json --provider 1 --service 1 --date 2024-01-15 --grid 15
//!
//! # Check a booking before writing it
//! slots check --schedule clinic.json --provider 1 --service 1 \
//!     --date 2024-01-15 --start 10:30:00 --end 11:00:00
//!
//! # Run the raw engine on a JSON request (stdin → stdout)
//! echo '{"date":"2024-01-15","window":{"start":"09:00:00","end":"12:00:00"},
//!        "duration_minutes":30,"grid_minutes":30}' | slots compute
//! ```
//!
//! Rejected queries print the HTTP-style error body on stderr and exit with
//! status 1. Logs go to stderr; raise verbosity with `-v` or `RUST_LOG`.

mod config;

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use slot_engine::availability::check_booking;
use slot_engine::types::minutes;
use slot_engine::wire::{compute_json, parse_date, parse_time_of_day};
use slot_engine::{
    AvailabilityQuery, AvailabilityService, BookingRequest, Domain, ErrorResponse,
    InMemoryRepository, SlotError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Bookable slot availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file with grid steps and the default domain
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List open slots for a provider, service and date
    Available {
        /// JSON schedule snapshot (providers, services, bookings)
        #[arg(long)]
        schedule: PathBuf,
        #[arg(long)]
        provider: u64,
        #[arg(long)]
        service: u64,
        /// Date in YYYY-MM-DD form
        #[arg(long, value_parser = date_arg)]
        date: NaiveDate,
        /// Response vocabulary and default grid: healthcare or cleaning
        #[arg(long)]
        domain: Option<Domain>,
        /// Grid step in minutes (overrides the config file)
        #[arg(long, allow_negative_numbers = true)]
        grid: Option<i64>,
    },
    /// Check whether a booking fits the schedule without conflicts
    Check {
        #[arg(long)]
        schedule: PathBuf,
        #[arg(long)]
        provider: u64,
        #[arg(long)]
        service: u64,
        #[arg(long, value_parser = date_arg)]
        date: NaiveDate,
        /// Start time, HH:MM:SS
        #[arg(long, value_parser = time_arg)]
        start: NaiveTime,
        /// End time, HH:MM:SS
        #[arg(long, value_parser = time_arg)]
        end: NaiveTime,
    },
    /// Run the engine on a raw JSON request
    Compute {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// A query the engine or a lookup turned down, carried to `main` so it can be
/// printed as the HTTP error body.
#[derive(Debug)]
struct Rejected(ErrorResponse);

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.status, self.0.error)
    }
}

impl std::error::Error for Rejected {}

impl From<SlotError> for Rejected {
    fn from(err: SlotError) -> Self {
        tracing::debug!(error = %err, "query rejected");
        Rejected(ErrorResponse::from(&err))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<Rejected>() {
            Some(Rejected(resp)) => {
                let body = serde_json::to_string(resp).unwrap_or_else(|_| resp.error.clone());
                eprintln!("{} {}", resp.status, body);
            }
            None => eprintln!("Error: {:#}", err),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Available {
            schedule,
            provider,
            service,
            date,
            domain,
            grid,
        } => {
            let domain = domain.unwrap_or(config.defaults.domain);
            let grid_step = match grid {
                Some(g) => minutes(g).map_err(Rejected::from)?,
                None => config.grid.step(domain).map_err(Rejected::from)?,
            };
            info!(%domain, grid_minutes = grid_step.num_minutes(), "querying availability");

            let svc = AvailabilityService::new(load_schedule(&schedule)?, grid_step);
            let report = svc
                .available_slots(&AvailabilityQuery {
                    provider_id: provider,
                    date,
                    service_id: service,
                })
                .map_err(Rejected::from)?;

            let body = serde_json::to_string_pretty(&domain.render(&report))?;
            println!("{}", body);
        }
        Commands::Check {
            schedule,
            provider,
            service,
            date,
            start,
            end,
        } => {
            let repo = load_schedule(&schedule)?;
            check_booking(
                &repo,
                &BookingRequest {
                    provider_id: provider,
                    service_id: service,
                    date,
                    start,
                    end,
                },
            )
            .map_err(Rejected::from)?;
            println!("OK");
        }
        Commands::Compute { input, output } => {
            let request = read_input(input.as_deref())?;
            let slots = compute_json(&request).map_err(Rejected::from)?;
            let value: serde_json::Value = serde_json::from_str(&slots)?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&value)?)?;
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_schedule(path: &Path) -> Result<InMemoryRepository> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file: {}", path.display()))?;
    InMemoryRepository::from_json(&json)
        .with_context(|| format!("Failed to load schedule file: {}", path.display()))
}

fn date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn time_arg(s: &str) -> std::result::Result<NaiveTime, String> {
    parse_time_of_day(s).map_err(|e| e.to_string())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
