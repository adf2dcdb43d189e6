//! Error types for slotgrid operations.

use thiserror::Error;

/// Errors that can occur at the engine's input boundary.
///
/// Slot computation itself is total: closed days, missing travel data, and
/// malformed work-hour rows all resolve to empty or degraded results rather
/// than errors, because the consumer is interactive UI.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A datetime string could not be parsed as RFC 3339 or a bare
    /// `YYYY-MM-DDTHH:MM:SS` local timestamp.
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    /// A booking referenced a service id that is not in the catalog.
    #[error("Unknown service: {0}")]
    UnknownService(String),
}

/// Convenience alias used throughout slotgrid.
pub type Result<T> = std::result::Result<T, EngineError>;
