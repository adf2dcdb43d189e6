//! Work-hour rules and bookable-window resolution.
//!
//! Maps a calendar date plus a business's weekly work-hour configuration
//! (and an optional "work started early" override) to the day's bookable
//! window. Resolution is total: past dates, non-workdays, and malformed
//! configuration rows resolve to a closed day, never a fault.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// One configured open/close range for a weekday.
///
/// At most one enabled rule per weekday is expected; resolution takes the
/// first enabled match. Disabled rules behave as if absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHourRule {
    pub day_of_week: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub enabled: bool,
}

impl WorkHourRule {
    /// Build a rule from the string form the configuration store uses.
    ///
    /// `day_of_week` accepts full or abbreviated English weekday names, case
    /// insensitive; times are `"HH:MM"` (a seconds component is tolerated).
    /// Returns `None` when any part is malformed: a missing rule, not a
    /// fault, since configuration lives outside this engine.
    pub fn from_store_row(day_of_week: &str, start: &str, end: &str, enabled: bool) -> Option<Self> {
        let day_of_week = day_of_week.trim().parse::<Weekday>().ok()?;
        let start = parse_time_of_day(start)?;
        let end = parse_time_of_day(end)?;
        Some(Self {
            day_of_week,
            start,
            end,
            enabled,
        })
    }
}

/// Parse `"HH:MM"` or `"HH:MM:SS"` into a time of day.
fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Parse an instant from RFC 3339, tolerating a bare `YYYY-MM-DDTHH:MM:SS`
/// local timestamp (interpreted on the business clock).
///
/// # Errors
/// Returns `EngineError::InvalidDatetime` when neither form parses.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|_| EngineError::InvalidDatetime(s.to_string()))
}

/// One-off indicator that work began before the configured opening time on
/// a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarlyStart {
    /// Instant the technician actually started working.
    pub started_at: DateTime<Utc>,
}

impl EarlyStart {
    /// Whether this override applies to `date`. An early start only ever
    /// shifts the window of its own calendar day.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.started_at.date_naive() == date
    }
}

/// Why a day has no bookable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedReason {
    /// The requested date is strictly before today; nothing is ever
    /// bookable in the past.
    PastDate,
    /// No enabled rule covers the weekday and no early-start override
    /// applies.
    NotAWorkday,
}

/// Resolved bookable window for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayWindow {
    Open {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Closed { reason: ClosedReason },
}

impl DayWindow {
    pub fn is_open(&self) -> bool {
        matches!(self, DayWindow::Open { .. })
    }
}

/// How an early-start override relates to the date being resolved.
enum EarlyApplicability {
    /// Work began early on this very date; carries the rounded-up start.
    SameDay(DateTime<Utc>),
    /// An override exists but for another date.
    OtherDay,
    NoOverride,
}

/// First enabled rule covering `date`'s weekday, if any.
pub fn rule_for_date(date: NaiveDate, rules: &[WorkHourRule]) -> Option<&WorkHourRule> {
    let weekday = date.weekday();
    rules.iter().find(|r| r.enabled && r.day_of_week == weekday)
}

/// Round an instant forward to the next `interval_minutes` boundary within
/// the day, truncating seconds. Instants already on a boundary are
/// unchanged.
pub fn round_up_to_interval(t: DateTime<Utc>, interval_minutes: i64) -> DateTime<Utc> {
    let floored =
        t - Duration::seconds(t.second() as i64) - Duration::nanoseconds(t.nanosecond() as i64);
    let minutes_into_day = (floored.hour() * 60 + floored.minute()) as i64;
    let remainder = minutes_into_day % interval_minutes;
    if remainder == 0 {
        floored
    } else {
        floored + Duration::minutes(interval_minutes - remainder)
    }
}

/// Resolve the bookable window for `date`.
///
/// The decision table, in order:
///
/// - dates before `today` are always closed;
/// - a configured rule supplies the window, with its start pulled forward
///   to the rounded-up early start when work began early that day at or
///   before the configured open;
/// - with no rule for the weekday, an early start on that day opens
///   `[round_up(early), fallback close]`, and an early start on another day
///   falls back to the default range;
/// - with no rules configured at all the default range applies (so a
///   business that has not set up hours yet can still preview slots);
/// - otherwise the day is closed.
pub fn resolve_window(
    date: NaiveDate,
    rules: &[WorkHourRule],
    early: Option<&EarlyStart>,
    today: NaiveDate,
    config: &EngineConfig,
) -> DayWindow {
    if date < today {
        return DayWindow::Closed {
            reason: ClosedReason::PastDate,
        };
    }

    let early = match early {
        Some(e) if e.applies_on(date) => EarlyApplicability::SameDay(round_up_to_interval(
            e.started_at,
            config.slot_interval_minutes,
        )),
        Some(_) => EarlyApplicability::OtherDay,
        None => EarlyApplicability::NoOverride,
    };

    let at = |time: NaiveTime| date.and_time(time).and_utc();

    match (rule_for_date(date, rules), early) {
        // An early start only ever widens the configured window; a rounded
        // start after the configured open leaves the window untouched.
        (Some(rule), EarlyApplicability::SameDay(rounded)) if rounded <= at(rule.start) => {
            DayWindow::Open {
                start: rounded,
                end: at(rule.end),
            }
        }
        (Some(rule), _) => DayWindow::Open {
            start: at(rule.start),
            end: at(rule.end),
        },
        (None, EarlyApplicability::SameDay(rounded)) => DayWindow::Open {
            start: rounded,
            end: at(config.fallback_close),
        },
        (None, EarlyApplicability::OtherDay) => DayWindow::Open {
            start: at(config.fallback_open),
            end: at(config.fallback_close),
        },
        (None, EarlyApplicability::NoOverride) if rules.is_empty() => DayWindow::Open {
            start: at(config.fallback_open),
            end: at(config.fallback_close),
        },
        (None, EarlyApplicability::NoOverride) => DayWindow::Closed {
            reason: ClosedReason::NotAWorkday,
        },
    }
}

/// Whether `t` is a permissible booking start: inside the resolved window,
/// or at/after the early-start instant when work began early that day.
/// Either condition suffices.
pub fn within_work_hours(t: DateTime<Utc>, window: &DayWindow, early: Option<&EarlyStart>) -> bool {
    let after_early = early.is_some_and(|e| e.applies_on(t.date_naive()) && t >= e.started_at);
    match window {
        DayWindow::Open { start, end } => (t >= *start && t < *end) || after_early,
        DayWindow::Closed { .. } => after_early,
    }
}
