//! Selection-time validation with toggle semantics.
//!
//! The booking form holds a [`SlotSelection`]; clicking a slot routes
//! through [`SlotSelection::select`], which re-validates the full requested
//! interval rather than the single clicked slot. A multi-slot booking can
//! start on an available slot and still run into an appointment beginning
//! mid-duration.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::appointment::Appointment;
use crate::conflict::check_interval_conflict;
use crate::workhours::{within_work_hours, DayWindow, EarlyStart};

/// Everything needed to validate a candidate start time.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub window: &'a DayWindow,
    pub early: Option<&'a EarlyStart>,
    pub appointments: &'a [Appointment],
    /// Total requested duration; the full interval is re-checked.
    pub duration_minutes: i64,
    pub travel_minutes: Option<i64>,
    pub now: DateTime<Utc>,
}

/// Why a candidate was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The requested interval runs into an existing appointment.
    Conflict,
    /// The travel-time estimate has not resolved yet.
    TravelNotReady,
    OutsideWorkHours,
    InPast,
}

/// Result of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// The candidate replaced (or became) the current selection.
    Selected { start: DateTime<Utc> },
    /// The candidate was already selected; the selection is now empty.
    Cleared,
    /// The candidate failed validation; the selection is unchanged.
    Rejected { reason: RejectReason },
}

/// Current selection state for the booking form.
///
/// Selecting the already-selected start time clears it; selecting a valid
/// different time replaces it; an invalid candidate is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotSelection {
    current: Option<DateTime<Utc>>,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<DateTime<Utc>> {
        self.current
    }

    /// Apply a click on `candidate` and report what happened.
    pub fn select(
        &mut self,
        candidate: DateTime<Utc>,
        ctx: &SelectionContext<'_>,
    ) -> SelectionOutcome {
        // Toggle comes first: deselecting is always permitted, even for a
        // slot that would no longer validate.
        if self.current == Some(candidate) {
            self.current = None;
            return SelectionOutcome::Cleared;
        }
        match validate(candidate, ctx) {
            Ok(()) => {
                self.current = Some(candidate);
                SelectionOutcome::Selected { start: candidate }
            }
            Err(reason) => SelectionOutcome::Rejected { reason },
        }
    }
}

fn validate(candidate: DateTime<Utc>, ctx: &SelectionContext<'_>) -> Result<(), RejectReason> {
    if ctx.travel_minutes.is_none() {
        return Err(RejectReason::TravelNotReady);
    }
    if candidate.date_naive() == ctx.now.date_naive() && candidate < ctx.now {
        return Err(RejectReason::InPast);
    }
    if !within_work_hours(candidate, ctx.window, ctx.early) {
        return Err(RejectReason::OutsideWorkHours);
    }
    if check_interval_conflict(candidate, ctx.duration_minutes, ctx.appointments) {
        return Err(RejectReason::Conflict);
    }
    Ok(())
}
