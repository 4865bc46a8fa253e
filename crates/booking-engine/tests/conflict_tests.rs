//! Tests for booking conflict detection.

use booking_engine::{check_booking, find_conflicts, BusyInterval, BusyKind, EngineError};
use chrono::{DateTime, TimeZone, Utc};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, minute, 0).unwrap()
}

/// Helper to create a booked appointment from hour ranges on Monday 2026-03-16.
fn busy(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> BusyInterval {
    BusyInterval::appointment(at(start_hour, start_min), at(end_hour, end_min))
}

#[test]
fn overlapping_booking_detected() {
    // Existing 09:00-10:00, proposed 09:30-10:30 → 30-min overlap
    let conflicts = find_conflicts(at(9, 30), at(10, 30), &[busy(9, 0, 10, 0)]);

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[0].busy.kind, BusyKind::Appointment);
}

#[test]
fn non_overlapping_booking_no_conflict() {
    let conflicts = find_conflicts(at(11, 0), at(12, 0), &[busy(9, 0, 10, 0)]);
    assert!(conflicts.is_empty());
}

#[test]
fn adjacent_booking_not_a_conflict() {
    // Existing 09:00-10:00, proposed 10:00-11:00 → adjacent, NOT overlapping
    let existing = [busy(9, 0, 10, 0)];
    assert!(find_conflicts(at(10, 0), at(11, 0), &existing).is_empty());
    assert!(find_conflicts(at(8, 0), at(9, 0), &existing).is_empty());
}

#[test]
fn booking_inside_time_off() {
    let existing = [BusyInterval::time_off(at(8, 0), at(18, 0))];
    let conflicts = find_conflicts(at(13, 0), at(13, 45), &existing);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 45);
    assert_eq!(conflicts[0].busy.kind, BusyKind::TimeOff);
}

#[test]
fn booking_spanning_several_intervals() {
    let existing = [busy(9, 0, 9, 30), busy(10, 0, 10, 15), busy(12, 0, 13, 0)];
    let conflicts = find_conflicts(at(9, 15), at(10, 30), &existing);
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].overlap_minutes, 15);
    assert_eq!(conflicts[1].overlap_minutes, 15);
}

#[test]
fn inverted_booking_range_is_rejected() {
    let err = check_booking(at(11, 0), at(9, 0), &[busy(10, 0, 10, 30)]).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidTimeRange {
            start: at(11, 0),
            end: at(9, 0)
        }
    );
    assert!(check_booking(at(10, 0), at(10, 0), &[]).is_err());
}

#[test]
fn valid_booking_range_reports_conflicts() {
    let conflicts = check_booking(at(10, 15), at(10, 45), &[busy(10, 0, 10, 30)]).unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 15);
}
