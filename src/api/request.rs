//! Request types for the flexible working hours API.
//!
//! Punch times arrive as the strings the attendance system produces and are
//! parsed once here, before any calculation runs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Locale, RawAttendanceRecord, TimeOfDay, parse_punch};

/// Request body for `/expected-clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// Arrival punch as `"HH:MM"`, or `"--:--"` when not punched.
    pub clock_in: String,
}

impl ClockInRequest {
    /// Parses the arrival punch.
    pub fn clock_in(&self) -> EngineResult<Option<TimeOfDay>> {
        parse_punch(&self.clock_in)
    }
}

/// Request body for `/remaining-time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemainingTimeRequest {
    /// Arrival punch as `"HH:MM"`, or `"--:--"` when not punched.
    pub clock_in: String,
    /// The caller's current local time.
    pub now: NaiveDateTime,
}

impl RemainingTimeRequest {
    /// Parses the arrival punch.
    pub fn clock_in(&self) -> EngineResult<Option<TimeOfDay>> {
        parse_punch(&self.clock_in)
    }
}

/// Request body for `/leave-strategy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveStrategyRequest {
    /// Arrival punch.
    pub punch_in: String,
    /// Departure punch.
    pub punch_out: String,
}

impl LeaveStrategyRequest {
    /// Parses both punches.
    pub fn punches(&self) -> EngineResult<(Option<TimeOfDay>, Option<TimeOfDay>)> {
        Ok((parse_punch(&self.punch_in)?, parse_punch(&self.punch_out)?))
    }
}

/// Request body for `/attendance/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The caller's current local date and time.
    pub now: NaiveDateTime,
    /// Records as returned by the attendance system.
    pub records: Vec<RawAttendanceRecord>,
    /// Overrides the configured abnormal-record window.
    #[serde(default)]
    pub search_days: Option<u32>,
    /// Overrides the configured display locale.
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl ReportRequest {
    /// Converts the raw records, failing on the first unparseable one.
    pub fn records(&self) -> EngineResult<Vec<AttendanceRecord>> {
        self.records
            .iter()
            .cloned()
            .map(AttendanceRecord::try_from)
            .collect()
    }
}
