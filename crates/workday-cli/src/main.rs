//! `workday`: resolve fractional working-day offsets from the command line.
//!
//! ```text
//! workday offset --start 2004-05-24T18:05 --days -5.5 --recurring 05-17 --holiday 2004-05-27
//! workday check --date 2004-05-17 --config calendar.json --json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workday_engine::{CalendarConfig, HolidaySpec, WorkdayCalendar};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Parser)]
#[command(
    name = "workday",
    version,
    about = "Working-day arithmetic over a holiday calendar"
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a signed, fractional number of working days from a timestamp
    Offset {
        /// Starting timestamp (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        start: String,

        /// Working days to move, e.g. 0.25 or -6.747
        #[arg(long, allow_negative_numbers = true)]
        days: f64,

        #[command(flatten)]
        calendar: CalendarArgs,

        /// Print JSON instead of a bare timestamp
        #[arg(long)]
        json: bool,
    },
    /// Report whether a date is a workday
    Check {
        /// Date to classify (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[command(flatten)]
        calendar: CalendarArgs,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct CalendarArgs {
    /// JSON calendar file (workday_start, workday_end, holidays)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Workday start time of day, overriding the config file
    #[arg(long, value_name = "HH:MM")]
    workday_start: Option<String>,

    /// Workday end time of day, overriding the config file
    #[arg(long, value_name = "HH:MM")]
    workday_end: Option<String>,

    /// One-off holiday (repeatable)
    #[arg(long = "holiday", value_name = "YYYY-MM-DD")]
    holidays: Vec<String>,

    /// Holiday recurring every year (repeatable)
    #[arg(long = "recurring", value_name = "MM-DD")]
    recurring: Vec<String>,
}

impl CalendarArgs {
    fn build(&self, anchor: NaiveDateTime) -> Result<WorkdayCalendar> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                CalendarConfig::from_json(&json)
                    .with_context(|| format!("failed to load {}", path.display()))?
            }
            None => CalendarConfig::default(),
        };

        if let Some(start) = &self.workday_start {
            config.workday_start = start.clone();
        }
        if let Some(end) = &self.workday_end {
            config.workday_end = end.clone();
        }
        for s in &self.holidays {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid --holiday '{s}' (expected YYYY-MM-DD)"))?;
            config.holidays.push(HolidaySpec::Fixed { date });
        }
        for s in &self.recurring {
            let (month, day) = parse_month_day(s)?;
            config.holidays.push(HolidaySpec::Recurring { month, day });
        }

        let calendar = config.build(anchor)?;
        debug!(
            window = ?calendar.window(),
            holidays = calendar.holidays().len(),
            "calendar configured"
        );
        Ok(calendar)
    }
}

#[derive(Serialize)]
struct OffsetOutput {
    start: String,
    offset_days: f64,
    resolved: String,
}

#[derive(Serialize)]
struct CheckOutput {
    date: String,
    weekday: String,
    workday: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Offset {
            start,
            days,
            calendar,
            json,
        } => {
            let anchor = parse_timestamp(&start)?;
            let calendar = calendar.build(anchor)?;
            let resolved = calendar
                .calculate_workday_offset(days)
                .with_context(|| format!("cannot move {days} working days from {anchor}"))?;

            if json {
                let output = OffsetOutput {
                    start: anchor.format(OUTPUT_FORMAT).to_string(),
                    offset_days: days,
                    resolved: resolved.format(OUTPUT_FORMAT).to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", resolved.format(OUTPUT_FORMAT));
            }
        }
        Command::Check {
            date,
            calendar,
            json,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("invalid --date '{date}' (expected YYYY-MM-DD)"))?;
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .context("midnight is a valid time")?;
            let calendar = calendar.build(midnight)?;
            let workday = calendar.is_workday(date);

            if json {
                let output = CheckOutput {
                    date: date.format("%Y-%m-%d").to_string(),
                    weekday: date.format("%A").to_string(),
                    workday,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if workday {
                println!("workday");
            } else {
                println!("non-workday");
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "workday=debug,workday_engine=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .with_context(|| format!("invalid timestamp '{s}' (expected YYYY-MM-DDTHH:MM[:SS])"))
}

fn parse_month_day(s: &str) -> Result<(u32, u32)> {
    let Some((month, day)) = s.trim().split_once('-') else {
        bail!("invalid --recurring '{s}' (expected MM-DD)");
    };
    let month = month
        .parse()
        .with_context(|| format!("invalid month in --recurring '{s}'"))?;
    let day = day
        .parse()
        .with_context(|| format!("invalid day in --recurring '{s}'"))?;
    Ok((month, day))
}
