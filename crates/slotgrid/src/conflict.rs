//! Interval conflict detection.
//!
//! A candidate interval conflicts with an appointment's blocked range when
//! the candidate's start falls inside it, the candidate's end falls inside
//! it, or the candidate fully contains it. Only appointments on the
//! candidate's own calendar day are compared.

use chrono::{DateTime, Duration, Utc};

use crate::appointment::Appointment;

/// Three-way overlap test between a candidate `[start, end)` and a blocked
/// `[block_start, block_end)`.
///
/// Candidates that merely touch a boundary (ending exactly at the block
/// start, or beginning exactly at the block end) do not conflict.
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    block_start: DateTime<Utc>,
    block_end: DateTime<Utc>,
) -> bool {
    (start >= block_start && start < block_end)
        || (end > block_start && end <= block_end)
        || (start <= block_start && end >= block_end)
}

/// Index of the first appointment whose blocked range overlaps the full
/// `[start, start + duration)` candidate.
///
/// Only calendar-blocking statuses count, and only appointments whose
/// travel start falls on the candidate's calendar day.
pub fn find_blocking(
    start: DateTime<Utc>,
    duration_minutes: i64,
    appointments: &[Appointment],
) -> Option<usize> {
    let end = start + Duration::minutes(duration_minutes);
    let day = start.date_naive();
    appointments.iter().position(|apt| {
        apt.status.blocks_calendar()
            && apt.start.date_naive() == day
            && overlaps(start, end, apt.start, apt.end)
    })
}

/// Whether the full requested interval collides with any existing
/// appointment.
///
/// This is the selection-time re-check: a booking longer than one slot can
/// begin on an available slot and still run into an appointment that starts
/// mid-duration, so the whole `[start, start + duration)` range is tested,
/// not just the clicked slot.
pub fn check_interval_conflict(
    start: DateTime<Utc>,
    duration_minutes: i64,
    appointments: &[Appointment],
) -> bool {
    find_blocking(start, duration_minutes, appointments).is_some()
}
