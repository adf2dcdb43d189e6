//! Appointment records and their blocked calendar intervals.
//!
//! An appointment occupies `[start, end)` on the calendar: a travel phase
//! (driving to the customer) followed by a service phase. The phase split
//! is resolved once, when the record is loaded, into a tagged
//! [`BlockedInterval`]; records whose timestamps violate the ordering
//! invariant degrade to a single uniform block with a data-integrity
//! warning instead of failing the whole computation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a stored appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Scheduled,
    Active,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    /// Whether an appointment in this state occupies calendar time.
    /// Unconfirmed requests and finished or canceled jobs do not block
    /// slots.
    pub fn blocks_calendar(self) -> bool {
        matches!(self, Self::Confirmed | Self::Scheduled | Self::Active)
    }
}

/// An existing booking, supplied fresh by the data-access layer on every
/// evaluation. Immutable input to the engine.
///
/// `start` is when travel to the customer begins and `end` is when the
/// service finishes; together they bound the blocked interval. When
/// `service_start` is present it is authoritative for the phase boundary
/// and `travel_minutes` is informational only.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub customer_name: String,
    pub address: String,
    pub status: AppointmentStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub service_start: Option<DateTime<Utc>>,
    pub travel_minutes: Option<i64>,
}

/// Sub-phase of a blocked interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The technician is driving to the job.
    Travel,
    /// The service is being performed.
    Service,
}

/// How a blocked interval divides into phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseLayout {
    /// Travel up to `service_start`, service from there to the end. The
    /// travel phase is empty when `service_start` equals the interval
    /// start.
    TwoPhase { service_start: DateTime<Utc> },
    /// No usable phase boundary; the whole interval reads as service time.
    Uniform,
}

/// Which ordering invariant an appointment record violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityKind {
    EndBeforeStart,
    ServiceStartBeforeStart,
    ServiceStartAfterEnd,
}

/// Data-integrity problem found while resolving an appointment's phases.
/// The record still blocks the calendar as a uniform `[start, end)` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityWarning {
    pub appointment_id: String,
    pub kind: IntegrityKind,
}

/// The calendar time an appointment occupies, with its phase split
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub layout: PhaseLayout,
}

impl BlockedInterval {
    /// Resolve an appointment's blocked interval and phase split.
    ///
    /// The service phase begins at `service_start` when the record carries
    /// one, otherwise `travel_minutes` past the travel start, otherwise at
    /// the travel start itself (no travel phase). A record violating
    /// `start <= service_start <= end` yields a uniform block plus a
    /// warning, never an error.
    pub fn from_appointment(apt: &Appointment) -> (Self, Option<IntegrityWarning>) {
        let warn = |kind| {
            Some(IntegrityWarning {
                appointment_id: apt.id.clone(),
                kind,
            })
        };

        let service_start = apt.service_start.unwrap_or_else(|| match apt.travel_minutes {
            Some(minutes) => apt.start + Duration::minutes(minutes),
            None => apt.start,
        });

        let (layout, warning) = if apt.end < apt.start {
            (PhaseLayout::Uniform, warn(IntegrityKind::EndBeforeStart))
        } else if service_start < apt.start {
            (
                PhaseLayout::Uniform,
                warn(IntegrityKind::ServiceStartBeforeStart),
            )
        } else if service_start > apt.end {
            (
                PhaseLayout::Uniform,
                warn(IntegrityKind::ServiceStartAfterEnd),
            )
        } else {
            (PhaseLayout::TwoPhase { service_start }, None)
        };

        (
            Self {
                start: apt.start,
                end: apt.end,
                layout,
            },
            warning,
        )
    }

    /// Classify an instant within this interval: travel for
    /// `start <= t < service_start`, service for `service_start <= t < end`,
    /// `None` outside the interval entirely.
    pub fn phase_at(&self, t: DateTime<Utc>) -> Option<Phase> {
        if t < self.start || t >= self.end {
            return None;
        }
        match self.layout {
            PhaseLayout::TwoPhase { service_start } if t < service_start => Some(Phase::Travel),
            _ => Some(Phase::Service),
        }
    }
}
