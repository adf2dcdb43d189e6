//! `slotgrid` CLI -- preview a day's bookable slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print the slot grid for a date
//! slotgrid grid --date 2026-03-16 --work-hours hours.json \
//!   --appointments appts.json --travel-minutes 10
//!
//! # Resolve the bookable window only
//! slotgrid window --date 2026-03-16 --work-hours hours.json
//!
//! # Re-check a candidate interval (exit code 1 on conflict)
//! slotgrid check --start 2026-03-16T10:00:00 --duration 60 \
//!   --appointments appts.json
//! ```
//!
//! `--now` pins the engine clock for reproducible runs; it defaults to the
//! system clock.

mod input;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slotgrid::{
    check_interval_conflict, generate_slots, parse_instant, resolve_window, Appointment,
    ClosedReason, DayWindow, EarlyStart, EngineConfig, TimeSlot,
};
use std::process;

#[derive(Parser)]
#[command(name = "slotgrid", version, about = "Booking slot-grid preview tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the day's slot grid with availability markers
    Grid {
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Work-hours JSON file
        #[arg(long)]
        work_hours: String,
        /// Appointments JSON file
        #[arg(long)]
        appointments: String,
        /// Resolved travel time in minutes (omit to simulate "still loading")
        #[arg(long)]
        travel_minutes: Option<i64>,
        /// Instant work actually began, when it began early
        #[arg(long)]
        early_start: Option<String>,
        /// Engine clock override (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
    },
    /// Resolve the bookable window for a date
    Window {
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Work-hours JSON file
        #[arg(long)]
        work_hours: String,
        /// Instant work actually began, when it began early
        #[arg(long)]
        early_start: Option<String>,
        /// Engine clock override (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
    },
    /// Re-check a candidate interval against existing appointments
    Check {
        /// Proposed start instant
        #[arg(long)]
        start: String,
        /// Requested duration in minutes
        #[arg(long)]
        duration: i64,
        /// Appointments JSON file
        #[arg(long)]
        appointments: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grid {
            date,
            work_hours,
            appointments,
            travel_minutes,
            early_start,
            now,
        } => {
            let date = parse_date(&date)?;
            let now = resolve_now(now.as_deref())?;
            let rules = input::load_work_hours(&work_hours)?;
            let appointments = input::load_appointments(&appointments)?;
            let early = parse_early(early_start.as_deref())?;
            let config = EngineConfig::default();

            let window = resolve_window(date, &rules, early.as_ref(), now.date_naive(), &config);
            let (slots, warnings) = generate_slots(
                date,
                &window,
                &appointments,
                travel_minutes,
                early.as_ref(),
                now,
                &config,
            );

            for warning in &warnings {
                eprintln!(
                    "warning: appointment {}: {:?}",
                    warning.appointment_id, warning.kind
                );
            }

            match window {
                DayWindow::Closed { reason } => println!("{}", closed_message(reason)),
                DayWindow::Open { start, end } => {
                    println!(
                        "Window: {} - {}",
                        start.format("%H:%M"),
                        end.format("%H:%M")
                    );
                    if travel_minutes.is_none() {
                        println!("Waiting for travel time; no slots to show yet.");
                    } else {
                        for slot in &slots {
                            println!("{}", slot_line(slot, &appointments, now));
                        }
                        let available = slots.iter().filter(|s| s.available).count();
                        println!("{} of {} slots available", available, slots.len());
                    }
                }
            }
        }
        Commands::Window {
            date,
            work_hours,
            early_start,
            now,
        } => {
            let date = parse_date(&date)?;
            let now = resolve_now(now.as_deref())?;
            let rules = input::load_work_hours(&work_hours)?;
            let early = parse_early(early_start.as_deref())?;

            let window = resolve_window(
                date,
                &rules,
                early.as_ref(),
                now.date_naive(),
                &EngineConfig::default(),
            );
            match window {
                DayWindow::Open { start, end } => println!(
                    "Open: {} - {}",
                    start.format("%H:%M"),
                    end.format("%H:%M")
                ),
                DayWindow::Closed { reason } => println!("{}", closed_message(reason)),
            }
        }
        Commands::Check {
            start,
            duration,
            appointments,
        } => {
            let start = parse_instant(&start).context("Failed to parse --start")?;
            let appointments = input::load_appointments(&appointments)?;

            if check_interval_conflict(start, duration, &appointments) {
                println!(
                    "Conflict: {} minutes starting {} overlaps an existing appointment",
                    duration,
                    start.format("%Y-%m-%d %H:%M")
                );
                process::exit(1);
            }
            println!(
                "Clear: {} minutes starting {} fits",
                duration,
                start.format("%Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {}", s))
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => parse_instant(s).context("Failed to parse --now"),
        None => Ok(Utc::now()),
    }
}

fn parse_early(early_start: Option<&str>) -> Result<Option<EarlyStart>> {
    early_start
        .map(|s| {
            parse_instant(s)
                .context("Failed to parse --early-start")
                .map(|started_at| EarlyStart { started_at })
        })
        .transpose()
}

fn closed_message(reason: ClosedReason) -> &'static str {
    match reason {
        ClosedReason::PastDate => "Closed: this date has already passed",
        ClosedReason::NotAWorkday => "Closed: no work hours for this day",
    }
}

/// One grid line: start time, marker, and the blocking context when there
/// is one.
fn slot_line(slot: &TimeSlot, appointments: &[Appointment], now: DateTime<Utc>) -> String {
    let time = slot.start.format("%H:%M");
    if slot.available {
        return format!("  {}  available", time);
    }
    if let Some(index) = slot.blocked_by {
        let name = &appointments[index].customer_name;
        let detail = match slot.phase {
            Some(slotgrid::Phase::Travel) => format!("traveling to {}", name),
            Some(slotgrid::Phase::Service) => format!("serving {}", name),
            None => format!("booked ({})", name),
        };
        return format!("  {}  blocked    {}", time, detail);
    }
    if slot.start < now {
        return format!("  {}  past", time);
    }
    format!("  {}  unavailable", time)
}
