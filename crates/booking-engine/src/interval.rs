//! Busy and free time intervals.
//!
//! All instants are stored in UTC. Intervals are half-open: `[start, end)`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// What made a stretch of time busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyKind {
    Appointment,
    TimeOff,
}

/// A busy stretch of a calendar, derived from a persisted appointment or time-off record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: BusyKind,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, kind: BusyKind) -> Self {
        Self { start, end, kind }
    }

    pub fn appointment(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, BusyKind::Appointment)
    }

    pub fn time_off(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, BusyKind::TimeOff)
    }

    /// True when the interval covers no time at all.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Strict overlap with `[start, end)`. Touching endpoints do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }

    /// Closed intersection with `[start, end]`, used when selecting the busy
    /// intervals relevant to a window.
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= end && self.end >= start
    }
}

/// A gap in the calendar between busy intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}
