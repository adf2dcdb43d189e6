//! Slot grid generation and per-slot availability evaluation.
//!
//! Tiles a resolved bookable window into fixed-width candidate slots and
//! marks each one available or blocked. Each evaluation regenerates the
//! grid from scratch; a day holds at most `(24 * 60) / 15 = 96` slots, so
//! there is nothing worth updating incrementally.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::appointment::{Appointment, BlockedInterval, IntegrityWarning, Phase};
use crate::config::EngineConfig;
use crate::conflict::overlaps;
use crate::workhours::{resolve_window, within_work_hours, DayWindow, EarlyStart, WorkHourRule};

/// A fixed-width candidate start time within a day. Ephemeral: generated
/// fresh per evaluation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Bookable: conflict-free, inside work hours, not in the past, with
    /// travel data ready.
    pub available: bool,
    /// Index into the caller's appointment slice of the appointment
    /// blocking this slot, when one overlaps it. A back-reference, never
    /// owned.
    pub blocked_by: Option<usize>,
    /// Phase of the blocking appointment at this slot's start, when the
    /// start falls inside the blocked range. Drives the travel-vs-service
    /// distinction in the picker.
    pub phase: Option<Phase>,
}

/// WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// What the booking form asks the engine to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub date: NaiveDate,
    /// Total requested duration; may span several slots. Enforced by the
    /// selection-time re-check, not by per-slot availability.
    pub duration_minutes: i64,
    /// Travel time resolved by the travel-time estimator. `None` means the
    /// estimate is not ready yet and no slots should be offered.
    pub travel_minutes: Option<i64>,
    /// Location of the job being scheduled. Reserved for a travel-time
    /// collaborator; conflict logic does not read it.
    pub job_location: Option<GeoPoint>,
}

/// A fully evaluated day: the resolved window, the slot grid, and any
/// data-integrity warnings produced while loading appointments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub window: DayWindow,
    pub slots: Vec<TimeSlot>,
    pub warnings: Vec<IntegrityWarning>,
}

/// Whether enough drive time precedes a slot.
///
/// Presence of the estimate is all that is required today (zero minutes is
/// valid); a travel-time collaborator may veto individual slots here later.
fn has_sufficient_travel(travel_minutes: Option<i64>) -> bool {
    travel_minutes.is_some()
}

/// Tile the resolved window into interval-sized slots and evaluate each.
///
/// Returns the slot grid plus any integrity warnings from phase-splitting
/// the day's appointments. The grid is empty when the window is closed or
/// when `travel_minutes` is unknown (the caller should show a "waiting for
/// travel time" state rather than a disabled grid). The final slot is
/// truncated at the window end if the window length is not a multiple of
/// the interval.
pub fn generate_slots(
    date: NaiveDate,
    window: &DayWindow,
    appointments: &[Appointment],
    travel_minutes: Option<i64>,
    early: Option<&EarlyStart>,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> (Vec<TimeSlot>, Vec<IntegrityWarning>) {
    let (window_start, window_end) = match window {
        DayWindow::Open { start, end } => (*start, *end),
        DayWindow::Closed { .. } => return (Vec::new(), Vec::new()),
    };
    if travel_minutes.is_none() {
        return (Vec::new(), Vec::new());
    }

    // Resolve phase splits once per appointment, keeping only records that
    // block this day's calendar.
    let mut warnings = Vec::new();
    let blocked: Vec<(usize, BlockedInterval)> = appointments
        .iter()
        .enumerate()
        .filter(|(_, apt)| apt.status.blocks_calendar() && apt.start.date_naive() == date)
        .map(|(index, apt)| {
            let (interval, warning) = BlockedInterval::from_appointment(apt);
            warnings.extend(warning);
            (index, interval)
        })
        .collect();

    let interval = config.slot_interval();
    let today = now.date_naive();

    let mut slots = Vec::new();
    let mut cursor = window_start;
    while cursor < window_end {
        let slot_end = (cursor + interval).min(window_end);

        let blocking = blocked
            .iter()
            .find(|(_, b)| overlaps(cursor, slot_end, b.start, b.end));

        let in_past = date == today && cursor < now;
        let in_hours = within_work_hours(cursor, window, early);
        let travel_ok = has_sufficient_travel(travel_minutes);

        slots.push(TimeSlot {
            start: cursor,
            end: slot_end,
            available: blocking.is_none() && !in_past && in_hours && travel_ok,
            blocked_by: blocking.map(|(index, _)| *index),
            phase: blocking.and_then(|(_, b)| b.phase_at(cursor)),
        });

        cursor = slot_end;
    }

    (slots, warnings)
}

/// Resolve the window and evaluate the full slot grid for a booking
/// request.
///
/// The one-call entry point for the booking form: combines the
/// work-calendar resolver and the slot generator. `now` is sampled once by
/// the caller, which keeps the whole evaluation a pure function of its
/// arguments.
pub fn compute_day_schedule(
    request: &BookingRequest,
    rules: &[WorkHourRule],
    appointments: &[Appointment],
    early: Option<&EarlyStart>,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> DaySchedule {
    let window = resolve_window(request.date, rules, early, now.date_naive(), config);
    let (slots, warnings) = generate_slots(
        request.date,
        &window,
        appointments,
        request.travel_minutes,
        early,
        now,
        config,
    );
    DaySchedule {
        window,
        slots,
        warnings,
    }
}
