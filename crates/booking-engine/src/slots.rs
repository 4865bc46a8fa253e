//! Bookable slot generation for one week.
//!
//! Collects the busy intervals touching the week, merges them, extracts the
//! free gaps, then tiles each gap with back-to-back appointment-sized slots
//! and keeps only the slots that sit within the weekly opening hours.

use std::fmt;
use std::iter;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{EngineError, Result};
use crate::flatten::flatten;
use crate::freetime::free_time;
use crate::hours::WeeklyHours;
use crate::interval::{BusyInterval, FreeInterval};
use crate::week::WeekRange;

/// Title attached to every generated slot.
pub const AVAILABLE_TITLE: &str = "Available";

/// `strftime` format used for slot and calendar display strings.
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// A kind of appointment a client can book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentType {
    pub id: u32,
    pub name: String,
    pub duration_minutes: i64,
}

impl AppointmentType {
    pub fn new(id: u32, name: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            id,
            name: name.into(),
            duration_minutes,
        }
    }

    /// The appointment length.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidDuration` if `duration_minutes <= 0` or too
    /// large to represent as a `chrono::Duration`.
    pub fn duration(&self) -> Result<Duration> {
        if self.duration_minutes <= 0 {
            return Err(EngineError::InvalidDuration(self.duration_minutes));
        }
        Duration::try_minutes(self.duration_minutes)
            .ok_or(EngineError::InvalidDuration(self.duration_minutes))
    }

    pub fn granularity(&self) -> Granularity {
        Granularity::for_duration(self.duration_minutes)
    }
}

/// Grid hint for booking UIs, derived from the appointment length.
///
/// Slot generation never uses this; it always tiles by the exact duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    ThirtyMinutes,
}

impl Granularity {
    /// `< 20` → 5, `20..=40` → 10, `41..=50` → 15, `> 50` → 30.
    pub fn for_duration(duration_minutes: i64) -> Self {
        match duration_minutes {
            m if m < 20 => Granularity::FiveMinutes,
            20..=40 => Granularity::TenMinutes,
            41..=50 => Granularity::FifteenMinutes,
            _ => Granularity::ThirtyMinutes,
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            Granularity::FiveMinutes => 5,
            Granularity::TenMinutes => 10,
            Granularity::FifteenMinutes => 15,
            Granularity::ThirtyMinutes => 30,
        }
    }
}

/// An open, bookable time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Display form in UTC.
    pub fn display(&self) -> DisplaySlot {
        self.display_in(&Utc)
    }

    /// Display form with both ends rendered in `tz`.
    pub fn display_in<Tz>(&self, tz: &Tz) -> DisplaySlot
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        DisplaySlot {
            title: AVAILABLE_TITLE.to_string(),
            start: format_instant(self.start, tz),
            end: format_instant(self.end, tz),
        }
    }
}

/// What the booking calendar renders for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySlot {
    pub title: String,
    pub start: String,
    pub end: String,
}

/// Render `instant` in `tz` using [`DISPLAY_FORMAT`].
pub fn format_instant<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    instant.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

/// Busy intervals whose closed span `[start, end]` touches the week's window.
pub fn busy_in_week(busy: &[BusyInterval], week: &WeekRange) -> Vec<BusyInterval> {
    let (window_start, window_end) = (week.window_start(), week.window_end());
    busy.iter()
        .filter(|interval| interval.intersects(window_start, window_end))
        .copied()
        .collect()
}

/// Cut `block` into contiguous, non-overlapping slots of exactly `duration`,
/// starting at the block's start. The remainder shorter than `duration` is dropped.
pub fn tile(block: FreeInterval, duration: Duration) -> impl Iterator<Item = Slot> {
    iter::successors(Some(block.start), move |cursor| Some(*cursor + duration))
        .take_while(move |cursor| *cursor + duration <= block.end)
        .map(move |start| Slot {
            start,
            end: start + duration,
        })
}

/// Compute the open slots for `appointment_type` in the week containing `date`.
///
/// Busy time is the union of every appointment and time-off interval touching
/// the week. Free gaps shorter than the appointment are skipped, the rest are
/// tiled from their (quarter-hour aligned) start, and a slot is kept only when
/// its start day is open by the slot start and its end day is still open at the
/// slot end.
///
/// # Errors
/// Returns `EngineError::InvalidDuration` if the appointment type's duration is
/// not positive. No slots (an empty `Vec`) is a valid result.
pub fn available_in_week(
    hours: &WeeklyHours,
    busy: &[BusyInterval],
    date: NaiveDate,
    appointment_type: &AppointmentType,
) -> Result<Vec<Slot>> {
    let duration = appointment_type.duration()?;
    let week = WeekRange::containing(date);

    if !hours.has_open_day() {
        debug!(week_start = %week.start, "no open hours configured, no slots");
        return Ok(Vec::new());
    }

    let busy_this_week = busy_in_week(busy, &week);
    let boundaries = flatten(&busy_this_week);
    let free = free_time(&boundaries, week.start, week.end)?;

    let slots: Vec<Slot> = free
        .iter()
        .filter(|block| block.duration() >= duration)
        .flat_map(|block| tile(*block, duration))
        .filter(|slot| {
            let admitted = hours.admits(slot.start, slot.end);
            if !admitted {
                trace!(start = %slot.start, end = %slot.end, "slot outside opening hours");
            }
            admitted
        })
        .collect();

    debug!(
        week_start = %week.start,
        week_end = %week.end,
        appointment_type = %appointment_type.name,
        busy = busy_this_week.len(),
        free = free.len(),
        slots = slots.len(),
        "computed weekly availability"
    );

    Ok(slots)
}
