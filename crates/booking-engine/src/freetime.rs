//! Break a date range into free time around flattened busy boundaries.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use tracing::trace;

use crate::error::{EngineError, Result};
use crate::interval::FreeInterval;
use crate::week::{end_of_day, start_of_day};

/// Push `time` forward to the next quarter-hour mark.
///
/// Only the minute of the hour is considered: 09:07:30 becomes 09:15:30, and
/// 09:15:30 is left alone.
pub fn align_to_quarter_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    let minute = i64::from(time.minute());
    let offset = (15 - (15 + minute) % 15) % 15;
    time + Duration::minutes(offset)
}

/// Compute the free intervals of `[start-of-day(range_start), end-of-day(range_end)]`
/// that are not covered by the busy runs in `boundaries`.
///
/// `boundaries` is the output of [`crate::flatten::flatten`]: sorted, disjoint
/// `(start, end)` pairs. Runs that lie wholly outside the window are ignored and
/// runs crossing either edge are clipped to it. Each free interval's start is
/// aligned forward to the next quarter hour; intervals that alignment empties
/// are dropped.
///
/// # Errors
/// Returns `EngineError::InvalidRange` if `range_end < range_start`.
/// Returns `EngineError::MalformedBoundaries` if `boundaries` has odd length.
pub fn free_time(
    boundaries: &[DateTime<Utc>],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<Vec<FreeInterval>> {
    if range_end < range_start {
        return Err(EngineError::InvalidRange {
            start: range_start,
            end: range_end,
        });
    }
    if boundaries.len() % 2 != 0 {
        return Err(EngineError::MalformedBoundaries(boundaries.len()));
    }

    let window_start = start_of_day(range_start);
    let window_end = end_of_day(range_end);

    let mut free = Vec::with_capacity(boundaries.len() / 2 + 1);
    let mut cursor = window_start;

    for pair in boundaries.chunks_exact(2) {
        let (busy_start, busy_end) = (pair[0], pair[1]);
        if busy_end < window_start || busy_start > window_end {
            continue;
        }
        if cursor < busy_start {
            push_aligned(&mut free, cursor, busy_start);
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < window_end {
        push_aligned(&mut free, cursor, window_end);
    }

    Ok(free)
}

fn push_aligned(free: &mut Vec<FreeInterval>, start: DateTime<Utc>, end: DateTime<Utc>) {
    let aligned = align_to_quarter_hour(start);
    if aligned < end {
        free.push(FreeInterval {
            start: aligned,
            end,
        });
    } else {
        trace!(%start, %end, "free gap vanished after quarter-hour alignment");
    }
}
