//! One person's schedule: working hours, appointment types, bookings and time off.
//!
//! `ScheduleProfile` is the in-memory shape of what the host application
//! persists per person. It feeds the availability engine and guards its own
//! bookings against overlap.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{Appointment, CalendarEvent, TimeOff};
use crate::conflict::check_booking;
use crate::error::{EngineError, Result};
use crate::hours::WeeklyHours;
use crate::interval::BusyInterval;
use crate::slots::{self, AppointmentType, Slot};

/// Appointments that ended more than this many weeks ago are expired.
const APPOINTMENT_RETENTION_WEEKS: i64 = 2;

/// Title used for appointments whose type has been removed.
const FALLBACK_TYPE_NAME: &str = "Appointment";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleProfile {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub weekly_hours: WeeklyHours,
    #[serde(default)]
    pub appointment_types: Vec<AppointmentType>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub time_off: Vec<TimeOff>,
}

impl ScheduleProfile {
    pub fn new(owner: impl Into<String>, weekly_hours: WeeklyHours) -> Self {
        Self {
            owner: owner.into(),
            weekly_hours,
            ..Self::default()
        }
    }

    /// Replace the weekly working hours.
    pub fn set_weekly_hours(&mut self, hours: WeeklyHours) {
        self.weekly_hours = hours;
    }

    /// Register a new appointment type and return its id.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidDuration` if `duration_minutes <= 0`, or
    /// `EngineError::AppointmentTypeIdsExhausted` when the highest id is `u32::MAX`.
    pub fn add_appointment_type(
        &mut self,
        name: impl Into<String>,
        duration_minutes: i64,
    ) -> Result<u32> {
        let id = match self.appointment_types.iter().map(|t| t.id).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or(EngineError::AppointmentTypeIdsExhausted(max))?,
            None => 1,
        };
        let appointment_type = AppointmentType::new(id, name, duration_minutes);
        appointment_type.duration()?;
        self.appointment_types.push(appointment_type);
        Ok(id)
    }

    /// Remove an appointment type along with every appointment of that type.
    pub fn remove_appointment_type(&mut self, id: u32) -> Option<AppointmentType> {
        let index = self.appointment_types.iter().position(|t| t.id == id)?;
        let removed = self.appointment_types.remove(index);
        self.appointments.retain(|appt| appt.type_id != id);
        Some(removed)
    }

    /// # Errors
    /// Returns `EngineError::UnknownAppointmentType` if no type has this id.
    pub fn appointment_type(&self, id: u32) -> Result<&AppointmentType> {
        self.appointment_types
            .iter()
            .find(|t| t.id == id)
            .ok_or(EngineError::UnknownAppointmentType(id))
    }

    /// Every appointment and time-off block as busy time.
    pub fn busy_intervals(&self) -> Vec<BusyInterval> {
        self.appointments
            .iter()
            .map(Appointment::busy)
            .chain(self.time_off.iter().map(TimeOff::busy))
            .collect()
    }

    /// Open slots for appointment type `type_id` in the week containing `date`.
    pub fn available_in_week(&self, date: NaiveDate, type_id: u32) -> Result<Vec<Slot>> {
        let appointment_type = self.appointment_type(type_id)?;
        slots::available_in_week(
            &self.weekly_hours,
            &self.busy_intervals(),
            date,
            appointment_type,
        )
    }

    /// Record an appointment, refusing unknown types, empty or inverted
    /// ranges, and anything overlapping existing busy time.
    pub fn book(&mut self, appointment: Appointment) -> Result<()> {
        self.appointment_type(appointment.type_id)?;

        let conflicts = check_booking(appointment.start, appointment.end, &self.busy_intervals())?;
        if !conflicts.is_empty() {
            debug!(
                start = %appointment.start,
                end = %appointment.end,
                conflicts = conflicts.len(),
                "rejecting overlapping booking"
            );
            return Err(EngineError::BookingConflict(conflicts.len()));
        }

        self.appointments.push(appointment);
        self.appointments.sort_by_key(|appt| appt.start);
        Ok(())
    }

    /// Record a time-off block. It must start no earlier than `now`.
    pub fn add_time_off(&mut self, time_off: TimeOff, now: DateTime<Utc>) -> Result<()> {
        if time_off.start < now {
            return Err(EngineError::TimeOffInPast(time_off.start));
        }
        if time_off.end <= time_off.start {
            return Err(EngineError::InvalidTimeRange {
                start: time_off.start,
                end: time_off.end,
            });
        }
        self.time_off.push(time_off);
        self.time_off.sort_by_key(|off| off.start);
        Ok(())
    }

    pub fn remove_time_off(&mut self, index: usize) -> Option<TimeOff> {
        (index < self.time_off.len()).then(|| self.time_off.remove(index))
    }

    /// Appointments starting, ending, or running through `today`.
    pub fn todays_appointments(&self, today: NaiveDate) -> Vec<CalendarEvent> {
        self.appointments
            .iter()
            .filter(|appt| appt.touches_day(today))
            .map(|appt| appt.to_event(self.type_name(appt.type_id)))
            .collect()
    }

    /// Time off starting, ending, or running through `today`.
    pub fn todays_time_off(&self, today: NaiveDate) -> Vec<CalendarEvent> {
        self.time_off
            .iter()
            .filter(|off| off.touches_day(today))
            .map(TimeOff::to_event)
            .collect()
    }

    /// All appointments followed by all time off, as calendar entries.
    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        self.appointments
            .iter()
            .map(|appt| appt.to_event(self.type_name(appt.type_id)))
            .chain(self.time_off.iter().map(TimeOff::to_event))
            .collect()
    }

    /// Drop appointments that ended more than two weeks before `now`.
    /// Returns how many were removed.
    pub fn expire_appointments(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::weeks(APPOINTMENT_RETENTION_WEEKS);
        let before = self.appointments.len();
        self.appointments.retain(|appt| appt.end >= cutoff);
        before - self.appointments.len()
    }

    /// Hour-truncated (earliest open, latest close) for sizing a calendar view.
    pub fn calendar_bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.weekly_hours.calendar_bounds()
    }

    fn type_name(&self, type_id: u32) -> &str {
        self.appointment_type(type_id)
            .map_or(FALLBACK_TYPE_NAME, |t| t.name.as_str())
    }
}
