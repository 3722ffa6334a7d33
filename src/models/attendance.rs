//! Attendance records supplied by the upstream attendance system.
//!
//! [`RawAttendanceRecord`] mirrors the upstream JSON shape. Converting it into
//! an [`AttendanceRecord`] parses the date and every punch exactly once, so the
//! calculations only ever see typed, optional times.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::time_of_day::{TimeOfDay, parse_punch};

/// Attendance status of a day as classified by the attendance system.
///
/// Accepts the upstream Chinese labels as well as the snake_case names.
///
/// # Example
///
/// ```
/// use flextime_engine::models::AttendanceStatus;
///
/// let status: AttendanceStatus = serde_json::from_str("\"異常\"").unwrap();
/// assert_eq!(status, AttendanceStatus::Abnormal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Punches satisfy the working hours policy.
    #[serde(alias = "正常")]
    Normal,
    /// Late arrival or early departure that needs leave to be filed.
    #[serde(alias = "異常")]
    Abnormal,
    /// The day is covered by leave.
    #[serde(alias = "請假")]
    Leave,
    /// The employee was on a business trip.
    #[serde(alias = "出差")]
    BusinessTrip,
    /// No punch was recorded.
    #[serde(alias = "未打卡")]
    MissingPunch,
}

/// An attendance record exactly as the upstream API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendanceRecord {
    /// Employee number.
    pub employee_id: String,
    /// Employee display name.
    #[serde(default)]
    pub name: String,
    /// Date such as `2025/09/24(二)`.
    pub date: String,
    /// Upstream status label.
    pub status: AttendanceStatus,
    /// Punch-in time or `--:--`.
    #[serde(default)]
    pub punch_in: String,
    /// Punch-out time or `--:--`.
    #[serde(default)]
    pub punch_out: String,
    /// Time leave was registered until, or `--:--`.
    #[serde(default)]
    pub leave_time: String,
    /// Department name.
    #[serde(default)]
    pub dept_name: String,
}

/// A parsed attendance record for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Employee number.
    pub employee_id: String,
    /// Employee display name.
    pub name: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The upstream classification of the day.
    pub status: AttendanceStatus,
    /// Arrival punch, if any.
    pub punch_in: Option<TimeOfDay>,
    /// Departure punch, if any.
    pub punch_out: Option<TimeOfDay>,
    /// Registered leave time, if any.
    pub leave_time: Option<TimeOfDay>,
    /// Department name.
    pub dept_name: String,
}

impl TryFrom<RawAttendanceRecord> for AttendanceRecord {
    type Error = EngineError;

    fn try_from(raw: RawAttendanceRecord) -> EngineResult<Self> {
        Ok(AttendanceRecord {
            date: parse_record_date(&raw.date)?,
            punch_in: parse_punch(&raw.punch_in)?,
            punch_out: parse_punch(&raw.punch_out)?,
            leave_time: parse_punch(&raw.leave_time)?,
            employee_id: raw.employee_id,
            name: raw.name,
            status: raw.status,
            dept_name: raw.dept_name,
        })
    }
}

/// Parses an upstream record date.
///
/// The attendance system appends the weekday in parentheses
/// (`2025/09/24(二)`); that suffix is dropped. ISO dates are accepted too.
///
/// # Example
///
/// ```
/// use flextime_engine::models::parse_record_date;
/// use chrono::NaiveDate;
///
/// let date = parse_record_date("2025/9/24(三)").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 24).unwrap());
/// ```
pub fn parse_record_date(input: &str) -> EngineResult<NaiveDate> {
    let date_part = input.split('(').next().unwrap_or_default().trim();

    NaiveDate::parse_from_str(date_part, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y-%m-%d"))
        .map_err(|e| EngineError::InvalidDate {
            input: input.to_string(),
            message: e.to_string(),
        })
}
