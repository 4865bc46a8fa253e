//! Tests for weekly slot generation.

use booking_engine::slots::{busy_in_week, tile};
use booking_engine::{
    available_in_week, week_range, AppointmentType, BusyInterval, DayOfWeek, DisplaySlot,
    EngineError, FreeInterval, Granularity, Slot, WeeklyHours,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// Instant in March 2026. The 16th is a Monday.
fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn monday_nine_to_five() -> WeeklyHours {
    WeeklyHours::new().with_day(DayOfWeek::Monday, time(9, 0), time(17, 0))
}

fn appt_type(minutes: i64) -> AppointmentType {
    AppointmentType::new(1, "Checkup", minutes)
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn open_monday_without_bookings() {
    // Requested via a Wednesday; the week still contains Monday the 16th.
    let slots = available_in_week(&monday_nine_to_five(), &[], date(18), &appt_type(30)).unwrap();

    assert_eq!(slots.len(), 16, "09:00-17:00 holds sixteen 30-minute slots");
    assert_eq!(slots[0].start, at(16, 9, 0));
    assert_eq!(slots[0].end, at(16, 9, 30));
    let last = slots.last().unwrap();
    assert_eq!(last.end, at(16, 17, 0));
}

#[test]
fn booked_half_hour_is_not_offered() {
    let busy = [BusyInterval::appointment(at(16, 10, 0), at(16, 10, 30))];
    let slots = available_in_week(&monday_nine_to_five(), &busy, date(16), &appt_type(30)).unwrap();

    assert_eq!(slots.len(), 15);
    for slot in &slots {
        assert!(
            !busy[0].overlaps(slot.start, slot.end),
            "slot {:?} overlaps the booking",
            slot
        );
    }
    assert!(slots.iter().any(|s| s.end == at(16, 10, 0)));
    assert!(slots.iter().any(|s| s.start == at(16, 10, 30)));
}

#[test]
fn free_interval_shorter_than_duration_yields_nothing() {
    // Only 09:00-09:40 is free all week.
    let week = week_range(date(16));
    let busy = [
        BusyInterval::time_off(week.window_start(), at(16, 9, 0)),
        BusyInterval::time_off(at(16, 9, 40), week.window_end()),
    ];
    let slots = available_in_week(&monday_nine_to_five(), &busy, date(16), &appt_type(45)).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn free_interval_exactly_the_duration_yields_one_slot() {
    let week = week_range(date(16));
    let busy = [
        BusyInterval::time_off(week.window_start(), at(16, 9, 0)),
        BusyInterval::time_off(at(16, 9, 45), week.window_end()),
    ];
    let slots = available_in_week(&monday_nine_to_five(), &busy, date(16), &appt_type(45)).unwrap();
    assert_eq!(
        slots,
        vec![Slot {
            start: at(16, 9, 0),
            end: at(16, 9, 45)
        }]
    );
}

#[test]
fn slots_after_unaligned_booking_start_on_the_quarter() {
    let busy = [BusyInterval::appointment(at(16, 8, 0), at(16, 9, 7))];
    let slots = available_in_week(&monday_nine_to_five(), &busy, date(16), &appt_type(30)).unwrap();
    assert_eq!(slots[0].start, at(16, 9, 15));
    assert_eq!(slots[0].end, at(16, 9, 45));
}

// ── Opening hours ───────────────────────────────────────────────────────────

#[test]
fn slot_past_closing_is_rejected() {
    let hours = WeeklyHours::new().with_day(DayOfWeek::Monday, time(9, 0), time(17, 10));
    let slots = available_in_week(&hours, &[], date(16), &appt_type(30)).unwrap();
    assert_eq!(slots.last().unwrap().end, at(16, 17, 0));
    for slot in &slots {
        assert!(slot.end <= at(16, 17, 10));
    }
}

#[test]
fn no_open_day_means_no_slots() {
    let slots = available_in_week(&WeeklyHours::new(), &[], date(16), &appt_type(30)).unwrap();
    assert!(slots.is_empty());

    let closed = WeeklyHours::new().with_day(DayOfWeek::Monday, time(9, 0), time(9, 0));
    let slots = available_in_week(&closed, &[], date(16), &appt_type(30)).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn slot_spanning_midnight_needs_both_days() {
    let busy = [BusyInterval::appointment(at(16, 9, 0), at(16, 23, 30))];
    let late_monday = WeeklyHours::new().with_day(DayOfWeek::Monday, time(9, 0), time(23, 59));

    // Tuesday closed: the 23:30-00:30 slot is rejected.
    let slots = available_in_week(&late_monday, &busy, date(16), &appt_type(60)).unwrap();
    assert!(slots.iter().all(|s| s.start.date_naive() == s.end.date_naive()));

    // Tuesday open from midnight: Monday admits the start, Tuesday the end.
    let both = late_monday.with_day(DayOfWeek::Tuesday, time(0, 0), time(17, 0));
    let slots = available_in_week(&both, &busy, date(16), &appt_type(60)).unwrap();
    assert!(slots.contains(&Slot {
        start: at(16, 23, 30),
        end: at(17, 0, 30)
    }));
}

#[test]
fn every_open_day_gets_slots() {
    let mut hours = WeeklyHours::new();
    for day in DayOfWeek::ALL {
        hours = hours.with_day(day, time(10, 0), time(12, 0));
    }
    let slots = available_in_week(&hours, &[], date(19), &appt_type(60)).unwrap();
    assert_eq!(slots.len(), 14);
    assert_eq!(slots[0].start, at(15, 10, 0));
    assert_eq!(slots[13].end, at(21, 12, 0));
}

// ── Inputs ──────────────────────────────────────────────────────────────────

#[test]
fn non_positive_duration_is_rejected() {
    for minutes in [0, -30] {
        let err = available_in_week(&monday_nine_to_five(), &[], date(16), &appt_type(minutes))
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidDuration(minutes));
    }
}

#[test]
fn duration_beyond_chrono_range_is_rejected() {
    let err = available_in_week(&monday_nine_to_five(), &[], date(16), &appt_type(i64::MAX))
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidDuration(i64::MAX));
}

#[test]
fn busy_outside_the_week_is_ignored() {
    let busy = [BusyInterval::appointment(at(9, 9, 0), at(9, 17, 0))];
    let slots = available_in_week(&monday_nine_to_five(), &busy, date(16), &appt_type(30)).unwrap();
    assert_eq!(slots.len(), 16);
}

#[test]
fn busy_in_week_selects_touching_intervals() {
    let week = week_range(date(16));
    let busy = [
        BusyInterval::appointment(at(9, 9, 0), at(9, 10, 0)),
        BusyInterval::time_off(at(10, 0, 0), at(28, 0, 0)),
        BusyInterval::appointment(at(21, 23, 0), at(22, 1, 0)),
        BusyInterval::appointment(at(22, 9, 0), at(22, 10, 0)),
    ];
    let selected = busy_in_week(&busy, &week);
    assert_eq!(selected, vec![busy[1], busy[2]]);
}

#[test]
fn tile_is_contiguous_and_exact() {
    let block = FreeInterval {
        start: at(16, 9, 0),
        end: at(16, 10, 50),
    };
    let slots: Vec<Slot> = tile(block, Duration::minutes(25)).collect();
    assert_eq!(slots.len(), 4);
    for pair in slots.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert!(slots.iter().all(|s| s.duration_minutes() == 25));
    assert_eq!(slots[3].end, at(16, 10, 40));
}

// ── Display ─────────────────────────────────────────────────────────────────

#[test]
fn display_uses_calendar_format() {
    let slot = Slot {
        start: at(16, 9, 0),
        end: at(16, 9, 30),
    };
    assert_eq!(
        slot.display(),
        DisplaySlot {
            title: "Available".to_string(),
            start: "2026/03/16 09:00".to_string(),
            end: "2026/03/16 09:30".to_string(),
        }
    );
}

#[test]
fn display_in_converts_zone_at_the_boundary() {
    let slot = Slot {
        start: at(16, 13, 0),
        end: at(16, 14, 0),
    };
    // New York is on EDT (UTC-4) after 2026-03-08.
    let shown = slot.display_in(&chrono_tz::America::New_York);
    assert_eq!(shown.start, "2026/03/16 09:00");
    assert_eq!(shown.end, "2026/03/16 10:00");
}

#[test]
fn granularity_hint_bands() {
    let cases = [
        (5, 5),
        (19, 5),
        (20, 10),
        (30, 10),
        (40, 10),
        (41, 15),
        (50, 15),
        (51, 30),
        (120, 30),
    ];
    for (minutes, grid) in cases {
        assert_eq!(
            Granularity::for_duration(minutes).minutes(),
            grid,
            "{} minutes",
            minutes
        );
    }
    assert_eq!(appt_type(45).granularity(), Granularity::FifteenMinutes);
}
