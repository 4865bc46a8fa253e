//! Error types for booking-engine operations.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested date range ends before it starts.
    #[error("Invalid range: {end} is before {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Appointment durations must be strictly positive.
    #[error("Invalid duration: {0} minutes (must be greater than zero)")]
    InvalidDuration(i64),

    /// Busy boundaries must come in (start, end) pairs.
    #[error("Malformed busy boundaries: expected an even number of points, got {0}")]
    MalformedBoundaries(usize),

    #[error("Invalid time range: {end} does not come after {start}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Unknown appointment type: {0}")]
    UnknownAppointmentType(u32),

    /// Every appointment type id up to `u32::MAX` is taken.
    #[error("No appointment type id left after {0}")]
    AppointmentTypeIdsExhausted(u32),

    #[error("Booking overlaps {0} existing busy interval(s)")]
    BookingConflict(usize),

    #[error("Time off must start in the future (starts at {0})")]
    TimeOffInPast(DateTime<Utc>),
}

pub type Result<T> = std::result::Result<T, EngineError>;
