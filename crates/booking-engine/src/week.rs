//! Week and month ranges.
//!
//! Weeks run Sunday through Saturday. A week's time window starts at midnight
//! on Sunday and ends at the last microsecond of Saturday.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The Sunday-to-Saturday week containing some date. `end` is `start + 6 days`,
/// except for the weeks at the edges of chrono's calendar, which are clamped
/// to `NaiveDate::MIN` and `NaiveDate::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// Resolve the week that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        // Monday=0..Sunday=6 shifted so that Sunday=0.
        let offset = (date.weekday().num_days_from_monday() + 1) % 7;
        let start = date
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Midnight at the start of the week's Sunday.
    pub fn window_start(&self) -> DateTime<Utc> {
        start_of_day(self.start)
    }

    /// Last instant of the week's Saturday.
    pub fn window_end(&self) -> DateTime<Utc> {
        end_of_day(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The dates of the week, Sunday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let (start, end) = (self.start, self.end);
        (0..7)
            .map_while(move |i| start.checked_add_days(Days::new(i)))
            .take_while(move |day| *day <= end)
    }
}

/// Shorthand for [`WeekRange::containing`].
pub fn week_range(date: NaiveDate) -> WeekRange {
    WeekRange::containing(date)
}

/// First and last day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The last representable microsecond of `date` in UTC: the next midnight
/// minus one microsecond.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_micro = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_micro).and_utc()
}
