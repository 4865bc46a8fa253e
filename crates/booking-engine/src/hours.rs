//! Weekly working-hours template.
//!
//! Each day of the week maps to an open/close pair of times of day. A day that
//! is missing from the template, or whose open time is not before its close
//! time, is closed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "sun", alias = "sunday")]
    Sunday,
    #[serde(rename = "mon", alias = "monday")]
    Monday,
    #[serde(rename = "tue", alias = "tuesday")]
    Tuesday,
    #[serde(rename = "wed", alias = "wednesday")]
    Wednesday,
    #[serde(rename = "thu", alias = "thursday")]
    Thursday,
    #[serde(rename = "fri", alias = "friday")]
    Friday,
    #[serde(rename = "sat", alias = "saturday")]
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// The day on which `instant` falls (UTC).
    pub fn of(instant: DateTime<Utc>) -> Self {
        instant.weekday().into()
    }

    pub fn short_name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "sun",
            DayOfWeek::Monday => "mon",
            DayOfWeek::Tuesday => "tue",
            DayOfWeek::Wednesday => "wed",
            DayOfWeek::Thursday => "thu",
            DayOfWeek::Friday => "fri",
            DayOfWeek::Saturday => "sat",
        }
    }

    fn full_name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "sunday",
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DayOfWeek {
    type Err = EngineError;

    /// Accepts short (`"mon"`) or full (`"Monday"`) names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| lowered == day.short_name() || lowered == day.full_name())
            .ok_or_else(|| EngineError::InvalidDate(format!("unknown day of week '{}'", s)))
    }
}

/// Opening hours for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl DayHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    pub fn closed() -> Self {
        Self::new(NaiveTime::MIN, NaiveTime::MIN)
    }

    pub fn is_open(&self) -> bool {
        self.open < self.close
    }

    /// An appointment may start at `time` on this day.
    pub fn admits_start(&self, time: NaiveTime) -> bool {
        self.is_open() && self.open <= time
    }

    /// An appointment may end at `time` on this day.
    pub fn admits_end(&self, time: NaiveTime) -> bool {
        self.is_open() && time <= self.close
    }

    /// Closing at 23:59 or later counts as open until midnight.
    pub fn open_until_midnight(&self) -> bool {
        self.is_open() && self.close.hour() == 23 && self.close.minute() == 59
    }

    pub fn open_from_midnight(&self) -> bool {
        self.is_open() && self.open == NaiveTime::MIN
    }
}

impl Default for DayHours {
    fn default() -> Self {
        Self::closed()
    }
}

/// One person's weekly working hours, keyed by day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyHours {
    days: BTreeMap<DayOfWeek, DayHours>,
}

impl WeeklyHours {
    /// A template with every day closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`WeeklyHours::set`].
    pub fn with_day(mut self, day: DayOfWeek, open: NaiveTime, close: NaiveTime) -> Self {
        self.set(day, DayHours::new(open, close));
        self
    }

    pub fn set(&mut self, day: DayOfWeek, hours: DayHours) {
        self.days.insert(day, hours);
    }

    /// Hours for `day`; closed when the day was never configured.
    pub fn hours(&self, day: DayOfWeek) -> DayHours {
        self.days.get(&day).copied().unwrap_or_default()
    }

    /// True if at least one day has bookable hours.
    pub fn has_open_day(&self) -> bool {
        self.days.values().any(DayHours::is_open)
    }

    /// Whether a slot `[start, end)` sits within opening hours: its start day
    /// must be open by `start` and its end day must still be open at `end`.
    ///
    /// A slot that crosses midnight (including one ending exactly at midnight)
    /// additionally needs its start day open until midnight and its end day
    /// open from midnight.
    pub fn admits(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let first = self.hours(DayOfWeek::of(start));
        let last = self.hours(DayOfWeek::of(end));
        if !(first.admits_start(start.time()) && last.admits_end(end.time())) {
            return false;
        }
        start.date_naive() == end.date_naive()
            || (first.open_until_midnight() && last.open_from_midnight())
    }

    /// Earliest opening hour and latest closing hour over all open days,
    /// both truncated to the hour. `None` when every day is closed.
    pub fn calendar_bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        let open_days = || self.days.values().filter(|hours| hours.is_open());
        let earliest = open_days().map(|hours| hours.open).min()?;
        let latest = open_days().map(|hours| hours.close).max()?;
        Some((truncate_to_hour(earliest), truncate_to_hour(latest)))
    }
}

fn truncate_to_hour(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), 0, 0).unwrap_or(time)
}
