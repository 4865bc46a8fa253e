//! # booking-engine
//!
//! Weekly availability computation for appointment booking.
//!
//! Given a person's weekly working hours, their booked appointments and their
//! time off, the engine computes the open slots of a requested week for a given
//! appointment length. It is pure and synchronous: every call takes immutable
//! inputs and returns a fresh result.
//!
//! ## Modules
//!
//! - [`week`] - Sunday-to-Saturday week ranges, month ranges, day edges
//! - [`interval`] - Busy and free intervals
//! - [`flatten`] - Merge busy intervals into disjoint busy runs
//! - [`freetime`] - Free gaps between busy runs, aligned to the quarter hour
//! - [`hours`] - Weekly working-hours template
//! - [`slots`] - Appointment-sized slot generation for a week
//! - [`conflict`] - Overlap checks for proposed bookings
//! - [`calendar`] - Appointment/time-off records and calendar entries
//! - [`profile`] - One person's schedule, tying the above together
//! - [`input`] - Form value parsing and formatting
//! - [`error`] - Error types

pub mod calendar;
pub mod conflict;
pub mod error;
pub mod flatten;
pub mod freetime;
pub mod hours;
pub mod input;
pub mod interval;
pub mod profile;
pub mod slots;
pub mod week;

pub use calendar::{Appointment, CalendarEvent, TimeOff};
pub use conflict::{check_booking, find_conflicts, Conflict};
pub use error::EngineError;
pub use flatten::flatten;
pub use freetime::{align_to_quarter_hour, free_time};
pub use hours::{DayHours, DayOfWeek, WeeklyHours};
pub use interval::{BusyInterval, BusyKind, FreeInterval};
pub use profile::ScheduleProfile;
pub use slots::{available_in_week, AppointmentType, DisplaySlot, Granularity, Slot};
pub use week::{month_range, week_range, WeekRange};
