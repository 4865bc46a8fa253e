//! Collapse busy intervals into an alternating boundary sequence.
//!
//! The output is `[start, end, start, end, ...]`: each pair is one continuous
//! busy run, pairs are sorted and never overlap or touch.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::interval::BusyInterval;

/// Merge busy intervals into sorted, disjoint busy runs.
///
/// Overlapping and adjacent intervals collapse into a single run. Runs are
/// extended by the running maximum end, so an interval swallowed by an earlier,
/// longer one never cuts the run short. Empty intervals (`end <= start`) block
/// nothing and are dropped. An empty input yields an empty boundary list.
pub fn flatten(intervals: &[BusyInterval]) -> Vec<DateTime<Utc>> {
    let mut sorted: Vec<(DateTime<Utc>, DateTime<Utc>)> = intervals
        .iter()
        .filter(|interval| {
            if interval.is_empty() {
                trace!(start = %interval.start, end = %interval.end, "dropping empty busy interval");
            }
            !interval.is_empty()
        })
        .map(|interval| (interval.start, interval.end))
        .collect();

    sorted.sort_by_key(|&(start, end)| (start, end));

    let mut boundaries: Vec<DateTime<Utc>> = Vec::with_capacity(sorted.len() * 2);
    for (start, end) in sorted {
        match boundaries.last_mut() {
            // Starts inside (or right at the end of) the current run.
            Some(run_end) if start <= *run_end => {
                if end > *run_end {
                    *run_end = end;
                }
            }
            _ => {
                boundaries.push(start);
                boundaries.push(end);
            }
        }
    }

    boundaries
}
