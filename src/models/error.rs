// Error types for schedule models

use thiserror::Error;

/// Validation failures raised while building schedule models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("time range start {start} must be before end {end}")]
    InvalidTimeRange { start: String, end: String },

    #[error("minute interval must be greater than zero")]
    InvalidInterval,

    #[error("event end {end} must be after start {start}")]
    InvalidEventTimes { start: String, end: String },

    #[error("event title cannot be empty")]
    EmptyTitle,

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
