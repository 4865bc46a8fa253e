//! Detect overlaps between a proposed booking and existing busy time.
//!
//! Adjacent intervals (where one ends exactly when another starts) are NOT conflicts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::BusyInterval;

/// A busy interval that a proposed booking would overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub busy: BusyInterval,
    pub overlap_minutes: i64,
}

/// Find every busy interval overlapping the proposed `[start, end)`.
///
/// Two intervals overlap when `a.start < b.end && b.start < a.end`.
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> Vec<Conflict> {
    busy.iter()
        .filter(|interval| interval.overlaps(start, end))
        .map(|interval| {
            let overlap_start = interval.start.max(start);
            let overlap_end = interval.end.min(end);
            Conflict {
                busy: *interval,
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}

/// [`find_conflicts`] for a booking request: the proposed range must end
/// after it starts.
///
/// # Errors
/// Returns `EngineError::InvalidTimeRange` if `end <= start`.
pub fn check_booking(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> Result<Vec<Conflict>> {
    if end <= start {
        return Err(EngineError::InvalidTimeRange { start, end });
    }
    Ok(find_conflicts(start, end, busy))
}
