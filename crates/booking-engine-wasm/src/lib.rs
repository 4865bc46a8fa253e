//! WASM bindings for booking-engine.
//!
//! Exposes week selection, slot generation, free-time computation and conflict
//! checks to a booking page via `wasm-bindgen`. Profiles and interval lists
//! cross the boundary as JSON strings; results come back as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{
    flatten, input, slots, week_range, BusyInterval, BusyKind, DisplaySlot, Granularity,
    ScheduleProfile,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WeekDto {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize)]
struct AvailabilityDto {
    available: Vec<DisplaySlot>,
    interval: u32,
}

#[derive(Serialize)]
struct FreeIntervalDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

#[derive(Serialize)]
struct ConflictDto {
    kind: BusyKind,
    start: String,
    end: String,
    overlap_minutes: i64,
}

/// Busy interval as sent from JavaScript. `kind` defaults to an appointment.
#[derive(Deserialize)]
struct BusyInput {
    start: String,
    end: String,
    #[serde(default)]
    kind: Option<BusyKind>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Naive datetimes (no offset) are interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    input::parse_week_date(s).map_err(js_err)
}

fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            let kind = input.kind.unwrap_or(BusyKind::Appointment);
            Ok(BusyInterval::new(start, end, kind))
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// The Sunday-to-Saturday week containing `date`, as `{start, end}` dates.
#[wasm_bindgen(js_name = "weekRange")]
pub fn week_range_js(date: &str) -> Result<String, JsValue> {
    let week = week_range(parse_date(date)?);
    to_json(&WeekDto {
        start: week.start,
        end: week.end,
    })
}

/// Open slots for one appointment type in the week containing `date`.
///
/// `profile_json` is a serialized `ScheduleProfile`. Slot strings are rendered
/// in `timezone` (an IANA name) when given, UTC otherwise. Returns
/// `{available: [{title, start, end}], interval}`.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    profile_json: &str,
    date: &str,
    type_id: u32,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let profile: ScheduleProfile = serde_json::from_str(profile_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid profile JSON: {}", e)))?;
    let date = parse_date(date)?;
    let tz: Tz = match timezone.as_deref() {
        Some(name) => name
            .parse()
            .map_err(|e| JsValue::from_str(&format!("Unknown time zone '{}': {}", name, e)))?,
        None => Tz::UTC,
    };

    let appointment_type = profile.appointment_type(type_id).map_err(js_err)?;
    let available = profile
        .available_in_week(date, type_id)
        .map_err(js_err)?;

    to_json(&AvailabilityDto {
        available: available.iter().map(|slot| slot.display_in(&tz)).collect(),
        interval: appointment_type.granularity().minutes(),
    })
}

/// Free intervals between `start_date` and `end_date` (inclusive days), given
/// a JSON array of `{start, end, kind?}` busy intervals.
#[wasm_bindgen(js_name = "freeTime")]
pub fn free_time_js(busy_json: &str, start_date: &str, end_date: &str) -> Result<String, JsValue> {
    let busy = parse_busy_json(busy_json)?;
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    let free = booking_engine::free_time(&flatten(&busy), start, end).map_err(js_err)?;

    let dtos: Vec<FreeIntervalDto> = free
        .iter()
        .map(|block| FreeIntervalDto {
            start: block.start.to_rfc3339(),
            end: block.end.to_rfc3339(),
            duration_minutes: block.duration_minutes(),
        })
        .collect();
    to_json(&dtos)
}

/// Suggested calendar grid interval, in minutes, for an appointment length.
#[wasm_bindgen(js_name = "granularity")]
pub fn granularity(duration_minutes: i32) -> u32 {
    Granularity::for_duration(i64::from(duration_minutes)).minutes()
}

/// Busy intervals a proposed `[start, end)` booking would overlap.
///
/// `busy_json` is a JSON array of `{start, end, kind?}` objects. Returns an
/// array of `{kind, start, end, overlap_minutes}`. A range whose `end` does
/// not come after `start` is an error.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(start: &str, end: &str, busy_json: &str) -> Result<String, JsValue> {
    let start = parse_datetime(start)?;
    let end = parse_datetime(end)?;
    let busy = parse_busy_json(busy_json)?;

    let dtos: Vec<ConflictDto> = booking_engine::check_booking(start, end, &busy)
        .map_err(js_err)?
        .iter()
        .map(|c| ConflictDto {
            kind: c.busy.kind,
            start: c.busy.start.to_rfc3339(),
            end: c.busy.end.to_rfc3339(),
            overlap_minutes: c.overlap_minutes,
        })
        .collect();
    to_json(&dtos)
}

/// Busy intervals of a profile restricted to the week containing `date`.
#[wasm_bindgen(js_name = "busyInWeek")]
pub fn busy_in_week(profile_json: &str, date: &str) -> Result<String, JsValue> {
    let profile: ScheduleProfile = serde_json::from_str(profile_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid profile JSON: {}", e)))?;
    let week = week_range(parse_date(date)?);
    to_json(&slots::busy_in_week(&profile.busy_intervals(), &week))
}
