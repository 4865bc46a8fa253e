//! Persisted calendar records and their calendar-event rendering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::BusyInterval;
use crate::slots::format_instant;
use crate::week::start_of_day;

/// A booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub type_id: u32,
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Appointment {
    pub fn busy(&self) -> BusyInterval {
        BusyInterval::appointment(self.start, self.end)
    }

    /// Calendar entry titled `"<type name>: <client name>"`.
    pub fn to_event(&self, type_name: &str) -> CalendarEvent {
        CalendarEvent::new(
            format!("{}: {}", type_name, self.client_name),
            self.start,
            self.end,
        )
    }

    pub fn touches_day(&self, day: NaiveDate) -> bool {
        touches_day(self.start, self.end, day)
    }
}

fn default_reason() -> String {
    "Vacation".to_string()
}

/// A block of time the person is unavailable for bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    #[serde(default = "default_reason")]
    pub reason: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeOff {
    pub fn new(reason: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            reason: reason.into(),
            start,
            end,
        }
    }

    pub fn busy(&self) -> BusyInterval {
        BusyInterval::time_off(self.start, self.end)
    }

    /// Calendar entry titled `"Time Off: <reason>"`.
    pub fn to_event(&self) -> CalendarEvent {
        CalendarEvent::new(format!("Time Off: {}", self.reason), self.start, self.end)
    }

    pub fn touches_day(&self, day: NaiveDate) -> bool {
        touches_day(self.start, self.end, day)
    }
}

/// A titled entry for the staff calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl CalendarEvent {
    fn new(title: String, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title,
            start: format_instant(start, &Utc),
            end: format_instant(end, &Utc),
        }
    }
}

/// Starts on `day`, ends on `day`, or runs across the start of `day`.
fn touches_day(start: DateTime<Utc>, end: DateTime<Utc>, day: NaiveDate) -> bool {
    let midnight = start_of_day(day);
    start.date_naive() == day || end.date_naive() == day || (start < midnight && end > midnight)
}
