//! Parsing and formatting for the booking forms.
//!
//! Form values arrive as US-style strings (`03/16/2026`, `09:00 AM`). These
//! helpers turn them into typed values for the engine; all instants are UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{EngineError, Result};

const TIME_OF_DAY_FORMAT: &str = "%I:%M %p";
const FORM_DATE_FORMAT: &str = "%m/%d/%Y";
const PICKER_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Parse a 12-hour time of day such as `"09:30 AM"`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_OF_DAY_FORMAT)
        .map_err(|e| EngineError::InvalidTime(format!("'{}': {}", s, e)))
}

/// Parse a date as entered in the week picker: `MM/DD/YYYY`, or ISO `YYYY-MM-DD`.
pub fn parse_week_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, FORM_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse a date-range picker value: `"MM/DD/YYYY hh:mm AM - MM/DD/YYYY hh:mm PM"`.
///
/// # Errors
/// Returns `EngineError::InvalidDateRange` unless the input is exactly two
/// parseable datetimes separated by `-`.
pub fn parse_picker_range(s: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let parts: Vec<&str> = s.split('-').map(str::trim).collect();
    let [start, end] = parts.as_slice() else {
        return Err(EngineError::InvalidDateRange(format!(
            "expected 'start - end', got '{}'",
            s
        )));
    };

    let parse = |part: &str| {
        NaiveDateTime::parse_from_str(part, PICKER_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| EngineError::InvalidDateRange(format!("'{}': {}", part, e)))
    };

    Ok((parse(*start)?, parse(*end)?))
}

/// Human-readable range for the time-off list.
///
/// Same-day ranges print the date once: `03/16/2026 09:00 AM - 05:00 PM`.
pub fn format_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    if start.date_naive() == end.date_naive() {
        format!(
            "{} - {}",
            start.format(PICKER_FORMAT),
            end.format(TIME_OF_DAY_FORMAT)
        )
    } else {
        format!("{} - {}", start.format(PICKER_FORMAT), end.format(PICKER_FORMAT))
    }
}
