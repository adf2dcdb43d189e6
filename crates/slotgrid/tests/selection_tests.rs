//! Tests for toggle-semantics slot selection.

use chrono::{TimeZone, Utc};
use slotgrid::{
    Appointment, AppointmentStatus, DayWindow, EarlyStart, RejectReason, SelectionContext,
    SelectionOutcome, SlotSelection,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn dt(h: u32, min: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, h, min, 0).unwrap()
}

fn appointment(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> Appointment {
    Appointment {
        id: "apt-1".to_string(),
        customer_name: "Dana Whitfield".to_string(),
        address: "7 Cedar Ct".to_string(),
        status: AppointmentStatus::Scheduled,
        start,
        end,
        service_start: None,
        travel_minutes: None,
    }
}

fn window() -> DayWindow {
    DayWindow::Open {
        start: dt(9, 0),
        end: dt(17, 0),
    }
}

fn ctx<'a>(window: &'a DayWindow, appointments: &'a [Appointment]) -> SelectionContext<'a> {
    SelectionContext {
        window,
        early: None,
        appointments,
        duration_minutes: 30,
        travel_minutes: Some(0),
        now: dt(8, 0),
    }
}

// ── Toggle semantics ────────────────────────────────────────────────────────

#[test]
fn selecting_twice_returns_to_no_selection() {
    let window = window();
    let ctx = ctx(&window, &[]);
    let mut selection = SlotSelection::new();

    assert_eq!(
        selection.select(dt(9, 30), &ctx),
        SelectionOutcome::Selected { start: dt(9, 30) }
    );
    assert_eq!(selection.current(), Some(dt(9, 30)));

    assert_eq!(selection.select(dt(9, 30), &ctx), SelectionOutcome::Cleared);
    assert_eq!(selection.current(), None, "toggle must clear the selection");

    // A third click selects again.
    assert_eq!(
        selection.select(dt(9, 30), &ctx),
        SelectionOutcome::Selected { start: dt(9, 30) }
    );
}

#[test]
fn selecting_a_different_time_replaces_the_selection() {
    let window = window();
    let ctx = ctx(&window, &[]);
    let mut selection = SlotSelection::new();

    selection.select(dt(9, 0), &ctx);
    assert_eq!(
        selection.select(dt(13, 15), &ctx),
        SelectionOutcome::Selected { start: dt(13, 15) }
    );
    assert_eq!(selection.current(), Some(dt(13, 15)));
}

#[test]
fn deselection_is_allowed_even_when_revalidation_would_fail() {
    let window = window();
    let empty = ctx(&window, &[]);
    let mut selection = SlotSelection::new();
    selection.select(dt(10, 0), &empty);

    // An appointment has since landed on the selected time; clicking the
    // selection again still clears it.
    let appointments = vec![appointment(dt(10, 0), dt(11, 0))];
    let busy = ctx(&window, &appointments);
    assert_eq!(selection.select(dt(10, 0), &busy), SelectionOutcome::Cleared);
    assert_eq!(selection.current(), None);
}

// ── Rejections are no-ops ───────────────────────────────────────────────────

#[test]
fn conflicting_candidate_is_rejected_and_state_unchanged() {
    let window = window();
    let appointments = vec![appointment(dt(10, 0), dt(11, 0))];
    let ctx = ctx(&window, &appointments);
    let mut selection = SlotSelection::new();
    selection.select(dt(9, 0), &ctx);

    assert_eq!(
        selection.select(dt(10, 15), &ctx),
        SelectionOutcome::Rejected {
            reason: RejectReason::Conflict
        }
    );
    assert_eq!(
        selection.current(),
        Some(dt(9, 0)),
        "a rejected candidate must not disturb the selection"
    );
}

#[test]
fn long_duration_collision_is_rejected() {
    // 09:45 is itself free, but 90 minutes from there crosses the 10:30
    // appointment.
    let window = window();
    let appointments = vec![appointment(dt(10, 30), dt(11, 30))];
    let mut c = ctx(&window, &appointments);
    c.duration_minutes = 90;
    let mut selection = SlotSelection::new();

    assert_eq!(
        selection.select(dt(9, 45), &c),
        SelectionOutcome::Rejected {
            reason: RejectReason::Conflict
        }
    );
    assert_eq!(selection.current(), None);
}

#[test]
fn unresolved_travel_time_is_rejected() {
    let window = window();
    let mut c = ctx(&window, &[]);
    c.travel_minutes = None;
    let mut selection = SlotSelection::new();

    assert_eq!(
        selection.select(dt(9, 0), &c),
        SelectionOutcome::Rejected {
            reason: RejectReason::TravelNotReady
        }
    );
}

#[test]
fn out_of_hours_candidate_is_rejected() {
    let window = window();
    let ctx = ctx(&window, &[]);
    let mut selection = SlotSelection::new();

    assert_eq!(
        selection.select(dt(8, 30), &ctx),
        SelectionOutcome::Rejected {
            reason: RejectReason::OutsideWorkHours
        }
    );
    assert_eq!(
        selection.select(dt(17, 0), &ctx),
        SelectionOutcome::Rejected {
            reason: RejectReason::OutsideWorkHours
        },
        "the window end is exclusive"
    );
}

#[test]
fn past_candidate_today_is_rejected() {
    let window = window();
    let mut c = ctx(&window, &[]);
    c.now = dt(12, 5);
    let mut selection = SlotSelection::new();

    assert_eq!(
        selection.select(dt(12, 0), &c),
        SelectionOutcome::Rejected {
            reason: RejectReason::InPast
        }
    );
    assert_eq!(
        selection.select(dt(12, 15), &c),
        SelectionOutcome::Selected { start: dt(12, 15) }
    );
}

// ── Early-start interplay ───────────────────────────────────────────────────

#[test]
fn early_start_admits_pre_window_candidates() {
    let window = window();
    let early = EarlyStart {
        started_at: dt(7, 0),
    };
    let mut c = ctx(&window, &[]);
    c.early = Some(&early);
    c.now = dt(7, 5);
    let mut selection = SlotSelection::new();

    assert_eq!(
        selection.select(dt(7, 30), &c),
        SelectionOutcome::Selected { start: dt(7, 30) },
        "times after the early start are valid even before the window"
    );
}
