//! Core data models for the flexible working hours engine.
//!
//! This module contains the boundary types shared by every calculation:
//! the [`TimeOfDay`] value, attendance records as supplied by the upstream
//! attendance system, and the display [`Locale`].

mod attendance;
mod locale;
mod time_of_day;

pub use attendance::{AttendanceRecord, AttendanceStatus, RawAttendanceRecord, parse_record_date};
pub use locale::Locale;
pub use time_of_day::{
    MINUTES_PER_DAY, NO_PUNCH, TimeOfDay, display_or_sentinel, parse_punch,
};
