//! Integration tests for the `slotgrid` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the grid, window,
//! and check subcommands through the actual binary with JSON fixtures and a
//! pinned `--now` so runs are reproducible.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the work_hours.json fixture.
fn work_hours_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/work_hours.json")
}

/// Helper: path to the appointments.json fixture.
fn appointments_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/appointments.json"
    )
}

// The fixtures describe a Monday-to-Friday business; 2026-03-16 is a
// Monday carrying one scheduled appointment (10:00-11:00, 15 travel
// minutes) and one canceled appointment (13:00-14:00).
const MONDAY: &str = "2026-03-16";
const MONDAY_MORNING: &str = "2026-03-16T08:00:00Z";

// ─────────────────────────────────────────────────────────────────────────────
// Grid subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn grid_shows_window_and_slot_markers() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "grid",
            "--date",
            MONDAY,
            "--work-hours",
            work_hours_path(),
            "--appointments",
            appointments_path(),
            "--travel-minutes",
            "10",
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Window: 09:00 - 17:00"))
        .stdout(predicate::str::contains("09:00  available"))
        .stdout(predicate::str::contains("traveling to Sarah Chen"))
        .stdout(predicate::str::contains("serving Sarah Chen"))
        .stdout(predicate::str::contains("28 of 32 slots available"));
}

#[test]
fn grid_ignores_canceled_appointments() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "grid",
            "--date",
            MONDAY,
            "--work-hours",
            work_hours_path(),
            "--appointments",
            appointments_path(),
            "--travel-minutes",
            "10",
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        // The canceled 13:00 appointment must not occupy its slot.
        .stdout(predicate::str::contains("13:00  available"))
        .stdout(predicate::str::contains("Luis Ortega").not());
}

#[test]
fn grid_without_travel_minutes_shows_waiting_state() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "grid",
            "--date",
            MONDAY,
            "--work-hours",
            work_hours_path(),
            "--appointments",
            appointments_path(),
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Waiting for travel time"))
        .stdout(predicate::str::contains("available").not());
}

#[test]
fn grid_on_a_closed_day_explains_itself() {
    // 2026-03-22 is a Sunday; the fixtures configure no Sunday hours.
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "grid",
            "--date",
            "2026-03-22",
            "--work-hours",
            work_hours_path(),
            "--appointments",
            appointments_path(),
            "--travel-minutes",
            "10",
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no work hours for this day"));
}

#[test]
fn grid_marks_elapsed_slots_unavailable() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "grid",
            "--date",
            MONDAY,
            "--work-hours",
            work_hours_path(),
            "--appointments",
            appointments_path(),
            "--travel-minutes",
            "10",
            "--now",
            "2026-03-16T12:05:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00  past"))
        .stdout(predicate::str::contains("12:15  available"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Window subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn window_resolves_configured_hours() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "window",
            "--date",
            MONDAY,
            "--work-hours",
            work_hours_path(),
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open: 09:00 - 17:00"));
}

#[test]
fn window_for_past_date_is_closed() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "window",
            "--date",
            "2026-03-09",
            "--work-hours",
            work_hours_path(),
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("already passed"));
}

#[test]
fn window_early_start_opens_a_non_workday() {
    // Work began 06:20 on the closed Sunday; the window opens from the
    // rounded-up 06:30 until the fallback close.
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "window",
            "--date",
            "2026-03-22",
            "--work-hours",
            work_hours_path(),
            "--early-start",
            "2026-03-22T06:20:00Z",
            "--now",
            "2026-03-22T06:25:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open: 06:30 - 22:00"));
}

#[test]
fn window_disabled_day_is_closed() {
    // Saturday exists in the fixture but is disabled.
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "window",
            "--date",
            "2026-03-21",
            "--work-hours",
            work_hours_path(),
            "--now",
            MONDAY_MORNING,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no work hours for this day"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_clear_interval_exits_zero() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "check",
            "--start",
            "2026-03-16T12:00:00Z",
            "--duration",
            "60",
            "--appointments",
            appointments_path(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clear"));
}

#[test]
fn check_conflicting_interval_exits_one() {
    // 09:30 + 60 minutes reaches into the 10:00 appointment.
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "check",
            "--start",
            "2026-03-16T09:30:00Z",
            "--duration",
            "60",
            "--appointments",
            appointments_path(),
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Conflict"));
}

#[test]
fn check_interval_ending_at_appointment_start_is_clear() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "check",
            "--start",
            "2026-03-16T09:00:00Z",
            "--duration",
            "60",
            "--appointments",
            appointments_path(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clear"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_file_fails_with_context() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "window",
            "--date",
            MONDAY,
            "--work-hours",
            "/nonexistent/hours.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read work-hours file"));
}

#[test]
fn invalid_date_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "window",
            "--date",
            "16/03/2026",
            "--work-hours",
            work_hours_path(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("grid"))
        .stdout(predicate::str::contains("window"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
