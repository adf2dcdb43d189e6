//! JSON input loading for the CLI.
//!
//! Row shapes match what the booking widget's data layer serves: camelCase
//! keys, `"HH:MM"` times-of-day, RFC 3339 instants. Malformed work-hour
//! rows are skipped (they behave as missing rules, i.e. closed days);
//! malformed appointment records are hard errors, since previewing against
//! wrong data is worse than no preview.

use anyhow::{Context, Result};
use serde::Deserialize;
use slotgrid::{parse_instant, Appointment, AppointmentStatus, WorkHourRule};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkHourRow {
    day_of_week: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    is_enabled: Option<EnabledFlag>,
}

/// The store keeps the enabled flag as the string `"true"`/`"false"` in
/// older rows and as a boolean in newer ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnabledFlag {
    Bool(bool),
    Text(String),
}

impl EnabledFlag {
    fn as_bool(&self) -> bool {
        match self {
            EnabledFlag::Bool(b) => *b,
            EnabledFlag::Text(s) => s == "true",
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentRecord {
    id: String,
    #[serde(default)]
    customer_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    status: Option<String>,
    start_time: String,
    end_time: String,
    #[serde(default)]
    service_start_time: Option<String>,
    #[serde(default)]
    travel_minutes: Option<i64>,
}

/// Unknown status strings are treated as calendar-blocking: over-blocking
/// a slot is recoverable, a double booking is not.
fn parse_status(s: Option<&str>) -> AppointmentStatus {
    match s {
        Some("pending") => AppointmentStatus::Pending,
        Some("confirmed") => AppointmentStatus::Confirmed,
        Some("active") => AppointmentStatus::Active,
        Some("completed") => AppointmentStatus::Completed,
        Some("canceled") => AppointmentStatus::Canceled,
        _ => AppointmentStatus::Scheduled,
    }
}

pub fn load_work_hours(path: &str) -> Result<Vec<WorkHourRule>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read work-hours file: {}", path))?;
    let rows: Vec<WorkHourRow> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid work-hours JSON: {}", path))?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let enabled = row.is_enabled.as_ref().is_some_and(EnabledFlag::as_bool);
            WorkHourRule::from_store_row(&row.day_of_week, &row.start_time, &row.end_time, enabled)
        })
        .collect())
}

pub fn load_appointments(path: &str) -> Result<Vec<Appointment>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read appointments file: {}", path))?;
    let records: Vec<AppointmentRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid appointments JSON: {}", path))?;

    records
        .into_iter()
        .map(|record| {
            let start = parse_instant(&record.start_time)
                .with_context(|| format!("Appointment {}: bad startTime", record.id))?;
            let end = parse_instant(&record.end_time)
                .with_context(|| format!("Appointment {}: bad endTime", record.id))?;
            let service_start = record
                .service_start_time
                .as_deref()
                .map(parse_instant)
                .transpose()
                .with_context(|| format!("Appointment {}: bad serviceStartTime", record.id))?;
            Ok(Appointment {
                status: parse_status(record.status.as_deref()),
                id: record.id,
                customer_name: record.customer_name,
                address: record.address,
                start,
                end,
                service_start,
                travel_minutes: record.travel_minutes,
            })
        })
        .collect()
}
