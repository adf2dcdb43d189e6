//! # slotgrid
//!
//! Appointment time-slot computation for mobile service businesses.
//!
//! Given a calendar day, a business's weekly work hours, the day's existing
//! appointments (each a travel phase followed by a service phase), and an
//! optional "work started early" override, slotgrid resolves the bookable
//! window, tiles it into fixed-width candidate slots (15 minutes by
//! default), marks each slot available or blocked, and re-validates a
//! chosen start time against the full requested duration before
//! submission.
//!
//! The engine is a pure, synchronous library: the current time is an
//! explicit argument, every evaluation regenerates the grid from scratch,
//! and bad input degrades to closed days or typed warnings instead of
//! faults, because the consumer is interactive UI.
//!
//! ## Modules
//!
//! - [`workhours`] -- weekly rules, early-start override, window resolution
//! - [`slots`] -- slot grid generation and availability evaluation
//! - [`conflict`] -- interval overlap tests and the selection-time re-check
//! - [`selection`] -- toggle-semantics slot selection
//! - [`appointment`] -- appointment records and phase-split blocked intervals
//! - [`catalog`] -- configurable service catalog
//! - [`config`] -- engine tuning (slot interval, fallback window)
//! - [`error`] -- error types

pub mod appointment;
pub mod catalog;
pub mod config;
pub mod conflict;
pub mod error;
pub mod selection;
pub mod slots;
pub mod workhours;

pub use appointment::{
    Appointment, AppointmentStatus, BlockedInterval, IntegrityKind, IntegrityWarning, Phase,
};
pub use catalog::{Service, ServiceCatalog};
pub use config::EngineConfig;
pub use conflict::check_interval_conflict;
pub use error::EngineError;
pub use selection::{RejectReason, SelectionContext, SelectionOutcome, SlotSelection};
pub use slots::{compute_day_schedule, generate_slots, BookingRequest, DaySchedule, TimeSlot};
pub use workhours::{
    parse_instant, resolve_window, round_up_to_interval, within_work_hours, ClosedReason,
    DayWindow, EarlyStart, WorkHourRule,
};
