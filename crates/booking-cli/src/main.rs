//! `booking` CLI: compute bookable slots and calendar views from a schedule profile.
//!
//! A schedule profile is a JSON document holding one person's weekly hours,
//! appointment types, appointments and time off (see `booking_engine::ScheduleProfile`).
//!
//! ## Usage
//!
//! ```sh
//! # Which Sunday-to-Saturday week contains a date
//! booking week 03/18/2026
//!
//! # Open slots for appointment type 1 in that week (profile on stdin)
//! cat profile.json | booking slots --date 2026-03-18 --type 1
//!
//! # Same, rendered in another display zone
//! booking slots -i profile.json --date 2026-03-18 --type 1 --tz America/New_York
//!
//! # Free intervals of the week
//! booking free -i profile.json --date 2026-03-18
//!
//! # Calendar entries, or just today's
//! booking events -i profile.json --today 2026-03-16
//!
//! # Would a booking collide with existing busy time?
//! booking check -i profile.json --start 2026-03-16T10:00:00Z --end 2026-03-16T10:30:00Z
//! ```
//!
//! Logging goes to stderr; set `--log-level` or `BOOKING_LOG` (e.g. `debug`).

use anyhow::{anyhow, Context, Result};
use booking_engine::{
    check_booking, flatten, free_time, input, slots, week_range, BusyInterval, DisplaySlot,
    ScheduleProfile,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Appointment availability from weekly hours, bookings and time off"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive (e.g. "warn", "booking_engine=debug")
    #[arg(long, global = true, env = "BOOKING_LOG", default_value = "warn")]
    log_level: String,

    /// IANA time zone used to render display strings
    #[arg(long, global = true, env = "BOOKING_DISPLAY_TZ", default_value = "UTC")]
    tz: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Sunday-to-Saturday week containing a date
    Week {
        /// Any date in the week (YYYY-MM-DD or MM/DD/YYYY)
        date: String,
    },
    /// List open slots for an appointment type
    Slots {
        /// Profile JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Any date in the requested week
        #[arg(long)]
        date: String,
        /// Appointment type id
        #[arg(long = "type")]
        type_id: u32,
    },
    /// List the free intervals of a week
    Free {
        /// Profile JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Any date in the requested week
        #[arg(long)]
        date: String,
    },
    /// List calendar entries for appointments and time off
    Events {
        /// Profile JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only entries touching this date
        #[arg(long)]
        today: Option<String>,
    },
    /// Check a proposed booking against existing busy time
    Check {
        /// Profile JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Proposed start (RFC 3339)
        #[arg(long)]
        start: String,
        /// Proposed end (RFC 3339)
        #[arg(long)]
        end: String,
    },
}

/// Response shape for `slots`, matching what the booking page consumes.
#[derive(Serialize)]
struct AvailabilityResponse {
    date: NaiveDate,
    week_start: NaiveDate,
    week_end: NaiveDate,
    available: Vec<DisplaySlot>,
    interval: u32,
}

#[derive(Serialize)]
struct FreeIntervalDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

#[derive(Serialize)]
struct ConflictDto {
    kind: booking_engine::BusyKind,
    start: String,
    end: String,
    overlap_minutes: i64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    let tz: Tz = cli
        .tz
        .parse()
        .map_err(|e| anyhow!("Unknown time zone '{}': {}", cli.tz, e))?;

    match cli.command {
        Commands::Week { date } => {
            let date = parse_date(&date)?;
            let week = week_range(date);
            println!("{} {}", week.start, week.end);
        }
        Commands::Slots {
            input,
            output,
            date,
            type_id,
        } => {
            let profile = read_profile(input.as_deref())?;
            let date = parse_date(&date)?;
            let appointment_type = profile.appointment_type(type_id)?;
            let available = profile
                .available_in_week(date, type_id)
                .context("Failed to compute availability")?;
            debug!(owner = %profile.owner, slots = available.len(), "computed slots");

            let week = week_range(date);
            let response = AvailabilityResponse {
                date,
                week_start: week.start,
                week_end: week.end,
                available: available.iter().map(|slot| slot.display_in(&tz)).collect(),
                interval: appointment_type.granularity().minutes(),
            };
            let json = serde_json::to_string_pretty(&response)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Free { input, date } => {
            let profile = read_profile(input.as_deref())?;
            let week = week_range(parse_date(&date)?);
            let busy = slots::busy_in_week(&profile.busy_intervals(), &week);
            let free = free_time(&flatten(&busy), week.start, week.end)?;

            let dtos: Vec<FreeIntervalDto> = free
                .iter()
                .map(|block| FreeIntervalDto {
                    start: block.start.to_rfc3339(),
                    end: block.end.to_rfc3339(),
                    duration_minutes: block.duration_minutes(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&dtos)?);
        }
        Commands::Events { input, today } => {
            let profile = read_profile(input.as_deref())?;
            let events = match today {
                Some(today) => {
                    let today = parse_date(&today)?;
                    let mut events = profile.todays_appointments(today);
                    events.extend(profile.todays_time_off(today));
                    events
                }
                None => profile.calendar_events(),
            };
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        Commands::Check { input, start, end } => {
            let profile = read_profile(input.as_deref())?;
            let start = parse_instant(&start)?;
            let end = parse_instant(&end)?;
            let busy: Vec<BusyInterval> = profile.busy_intervals();
            let conflicts =
                check_booking(start, end, &busy).context("Failed to check proposed booking")?;

            let dtos: Vec<ConflictDto> = conflicts
                .iter()
                .map(|c| ConflictDto {
                    kind: c.busy.kind,
                    start: c.busy.start.to_rfc3339(),
                    end: c.busy.end.to_rfc3339(),
                    overlap_minutes: c.overlap_minutes,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&dtos)?);

            if !conflicts.is_empty() {
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_tracing(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter: {}", directive))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    input::parse_week_date(raw).with_context(|| format!("Failed to parse date: {}", raw))
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Failed to parse datetime: {}", raw))
}

fn read_profile(path: Option<&str>) -> Result<ScheduleProfile> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse schedule profile JSON")
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
