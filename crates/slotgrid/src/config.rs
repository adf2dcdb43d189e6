//! Engine configuration.
//!
//! Grid spacing and the fallback day range are explicit input rather than
//! ambient constants, so one engine build serves differently configured
//! businesses.

use chrono::{Duration, NaiveTime};

/// Tuning knobs for window resolution and slot generation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Width of one candidate slot, and the boundary the early-start
    /// round-up snaps to.
    pub slot_interval_minutes: i64,
    /// Day start used when a business has no work hours configured at all.
    pub fallback_open: NaiveTime,
    /// Day end used when no configured rule supplies one.
    pub fallback_close: NaiveTime,
}

impl Default for EngineConfig {
    /// 15-minute slots, 06:00 to 22:00 fallback range.
    fn default() -> Self {
        Self {
            slot_interval_minutes: 15,
            fallback_open: NaiveTime::from_hms_opt(6, 0, 0).expect("valid time literal"),
            fallback_close: NaiveTime::from_hms_opt(22, 0, 0).expect("valid time literal"),
        }
    }
}

impl EngineConfig {
    /// The slot interval as a `chrono::Duration`.
    pub fn slot_interval(&self) -> Duration {
        Duration::minutes(self.slot_interval_minutes)
    }
}
