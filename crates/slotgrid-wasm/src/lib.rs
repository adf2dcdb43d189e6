//! WASM bindings for slotgrid.
//!
//! Exposes window resolution, slot-grid generation, and the selection-time
//! conflict re-check to the embeddable JavaScript booking widget via
//! `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! The widget supplies `now`/`today` explicitly (e.g. from
//! `new Date().toISOString()`), so the module itself reads no clock and
//! stays deterministic.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slotgrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slotgrid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slotgrid_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slotgrid::{
    generate_slots, parse_instant, resolve_window, Appointment, AppointmentStatus, DayWindow,
    EarlyStart, EngineConfig, IntegrityKind, IntegrityWarning, Phase, TimeSlot, WorkHourRule,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Work-hour row as the widget's configuration store serves it. The
/// enabled flag arrives as the string `"true"`/`"false"` in older rows and
/// as a boolean in newer ones.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkHourRow {
    day_of_week: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    is_enabled: Option<EnabledFlag>,
}

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

/// Appointment record as the widget receives it from the data layer.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentInput {
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

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum WindowDto {
    Open { start: String, end: String },
    Closed { reason: String },
}

impl From<&DayWindow> for WindowDto {
    fn from(window: &DayWindow) -> Self {
        match window {
            DayWindow::Open { start, end } => WindowDto::Open {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            },
            DayWindow::Closed { reason } => WindowDto::Closed {
                reason: match reason {
                    slotgrid::ClosedReason::PastDate => "pastDate".to_string(),
                    slotgrid::ClosedReason::NotAWorkday => "notAWorkday".to_string(),
                },
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotDto {
    start: String,
    end: String,
    available: bool,
    blocked_by: Option<usize>,
    phase: Option<&'static str>,
}

impl From<&TimeSlot> for SlotDto {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
            available: slot.available,
            blocked_by: slot.blocked_by,
            phase: slot.phase.map(|p| match p {
                Phase::Travel => "travel",
                Phase::Service => "service",
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WarningDto {
    appointment_id: String,
    kind: &'static str,
}

impl From<&IntegrityWarning> for WarningDto {
    fn from(w: &IntegrityWarning) -> Self {
        Self {
            appointment_id: w.appointment_id.clone(),
            kind: match w.kind {
                IntegrityKind::EndBeforeStart => "endBeforeStart",
                IntegrityKind::ServiceStartBeforeStart => "serviceStartBeforeStart",
                IntegrityKind::ServiceStartAfterEnd => "serviceStartAfterEnd",
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDto {
    window: WindowDto,
    slots: Vec<SlotDto>,
    warnings: Vec<WarningDto>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, JsValue> {
    parse_instant(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Convert a JSON array of work-hour rows into rules. Malformed rows are
/// skipped rather than rejected: a broken configuration row behaves as a
/// missing rule (closed day), because configuration lives outside the
/// engine.
fn parse_rules_json(json: &str) -> Result<Vec<WorkHourRule>, JsValue> {
    let rows: Vec<WorkHourRow> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid work-hours JSON: {}", e)))?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let enabled = row.is_enabled.as_ref().is_some_and(EnabledFlag::as_bool);
            WorkHourRule::from_store_row(&row.day_of_week, &row.start_time, &row.end_time, enabled)
        })
        .collect())
}

/// Unknown status strings are treated as calendar-blocking: over-blocking a
/// slot is recoverable, a double booking is not.
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

fn parse_appointments_json(json: &str) -> Result<Vec<Appointment>, JsValue> {
    let inputs: Vec<AppointmentInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid appointments JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start_time)?;
            let end = parse_datetime(&input.end_time)?;
            let service_start = input
                .service_start_time
                .as_deref()
                .map(parse_datetime)
                .transpose()?;
            Ok(Appointment {
                id: input.id,
                customer_name: input.customer_name,
                address: input.address,
                status: parse_status(input.status.as_deref()),
                start,
                end,
                service_start,
                travel_minutes: input.travel_minutes,
            })
        })
        .collect()
}

fn parse_early_start(early: Option<&str>) -> Result<Option<EarlyStart>, JsValue> {
    early
        .map(|s| parse_datetime(s).map(|started_at| EarlyStart { started_at }))
        .transpose()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve the bookable window for a date.
///
/// Returns a JSON object: `{"status":"open","start":...,"end":...}` or
/// `{"status":"closed","reason":...}`.
///
/// # Arguments
/// - `date` -- calendar date, `"YYYY-MM-DD"`
/// - `rules_json` -- JSON array of work-hour rows
///   (`{dayOfWeek, startTime, endTime, isEnabled}`)
/// - `early_start` -- optional instant work actually began
/// - `today` -- today's date on the business clock, `"YYYY-MM-DD"`
#[wasm_bindgen(js_name = "computeWindow")]
pub fn compute_window(
    date: &str,
    rules_json: &str,
    early_start: Option<String>,
    today: &str,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let rules = parse_rules_json(rules_json)?;
    let early = parse_early_start(early_start.as_deref())?;
    let today = parse_date(today)?;

    let window = resolve_window(date, &rules, early.as_ref(), today, &EngineConfig::default());

    serde_json::to_string(&WindowDto::from(&window))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Generate the day's slot grid.
///
/// Returns a JSON object with `window`, `slots` (each
/// `{start, end, available, blockedBy, phase}`), and `warnings`. The slot
/// list is empty when the day is closed or `travel_minutes` is not yet
/// resolved.
///
/// # Arguments
/// - `date` -- calendar date, `"YYYY-MM-DD"`
/// - `rules_json` -- JSON array of work-hour rows
/// - `appointments_json` -- JSON array of appointment records
/// - `early_start` -- optional instant work actually began
/// - `travel_minutes` -- resolved travel estimate; omit while still loading
/// - `now` -- current instant on the business clock
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots_js(
    date: &str,
    rules_json: &str,
    appointments_json: &str,
    early_start: Option<String>,
    travel_minutes: Option<u32>,
    now: &str,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let rules = parse_rules_json(rules_json)?;
    let appointments = parse_appointments_json(appointments_json)?;
    let early = parse_early_start(early_start.as_deref())?;
    let now = parse_datetime(now)?;
    let config = EngineConfig::default();

    let window = resolve_window(date, &rules, early.as_ref(), now.date_naive(), &config);
    let (slots, warnings) = generate_slots(
        date,
        &window,
        &appointments,
        travel_minutes.map(i64::from),
        early.as_ref(),
        now,
        &config,
    );

    let dto = ScheduleDto {
        window: WindowDto::from(&window),
        slots: slots.iter().map(SlotDto::from).collect(),
        warnings: warnings.iter().map(WarningDto::from).collect(),
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Whether the full `[start, start + duration)` interval collides with any
/// existing appointment. This is the selection-time re-check: a multi-slot
/// booking can start on a free slot and still run into a later appointment.
#[wasm_bindgen(js_name = "checkIntervalConflict")]
pub fn check_interval_conflict_js(
    start: &str,
    duration_minutes: u32,
    appointments_json: &str,
) -> Result<bool, JsValue> {
    let start = parse_datetime(start)?;
    let appointments = parse_appointments_json(appointments_json)?;
    Ok(slotgrid::check_interval_conflict(
        start,
        i64::from(duration_minutes),
        &appointments,
    ))
}
