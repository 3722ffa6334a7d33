//! Remaining time and overtime calculation.
//!
//! The current time is always passed in by the caller, which is expected to
//! re-run the calculation on its own refresh timer.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::config::FlexTimeRules;
use crate::models::{Locale, TimeOfDay, parse_punch};

use super::expected_clock_out::resolve_clock_out;
use super::time_utils::{format_duration, format_duration_clock};

/// Time left until the expected clock-out, or overtime past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTimeResult {
    /// The expected clock-out the countdown runs towards.
    pub expected_clock_out: Option<TimeOfDay>,
    /// Remaining time as `"HH:MM"`; `"00:00"` once overtime starts and `None`
    /// without a usable clock-in.
    pub remaining_time: Option<String>,
    /// Minutes left before the expected clock-out.
    pub remaining_minutes: u32,
    /// Whether the expected clock-out has been reached.
    pub is_overtime: bool,
    /// Minutes past the expected clock-out.
    pub overtime_minutes: u32,
    /// Human-readable summary.
    pub description: String,
}

impl RemainingTimeResult {
    fn no_data(description: String) -> Self {
        Self {
            expected_clock_out: None,
            remaining_time: None,
            remaining_minutes: 0,
            is_overtime: false,
            overtime_minutes: 0,
            description,
        }
    }
}

/// Calculates how long until the employee may leave.
///
/// `now` may be any chrono time type; only its hour and minute are used.
/// Reaching the expected clock-out exactly counts as overtime with zero
/// overtime minutes.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::calculate_remaining_time;
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
/// use chrono::NaiveTime;
///
/// let rules = FlexTimeRules::default();
/// let now = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
/// let result = calculate_remaining_time(Some(TimeOfDay::hm(8, 45)), &now, &rules);
///
/// assert_eq!(result.remaining_time.as_deref(), Some("01:30"));
/// assert_eq!(result.remaining_minutes, 90);
/// assert!(!result.is_overtime);
/// ```
pub fn calculate_remaining_time<T: Timelike>(
    clock_in: Option<TimeOfDay>,
    now: &T,
    rules: &FlexTimeRules,
) -> RemainingTimeResult {
    let Some(clock_in) = clock_in else {
        return RemainingTimeResult::no_data("Not clocked in yet".to_string());
    };

    let (_, expected_minutes) = resolve_clock_out(clock_in, rules);
    let now_minutes = TimeOfDay::from_timelike(now).minutes();
    let difference = expected_minutes as i64 - now_minutes as i64;
    let expected_clock_out = Some(TimeOfDay::from_day_minutes(expected_minutes));

    if difference > 0 {
        let remaining = difference as u32;
        RemainingTimeResult {
            expected_clock_out,
            remaining_time: Some(format_duration_clock(remaining)),
            remaining_minutes: remaining,
            is_overtime: false,
            overtime_minutes: 0,
            description: format!("{} left", format_duration(remaining, Locale::EnUs)),
        }
    } else {
        let overtime = difference.unsigned_abs() as u32;
        RemainingTimeResult {
            expected_clock_out,
            remaining_time: Some(format_duration_clock(0)),
            remaining_minutes: 0,
            is_overtime: true,
            overtime_minutes: overtime,
            description: format!("Overtime {}", format_duration(overtime, Locale::EnUs)),
        }
    }
}

/// Calculates remaining time from a raw punch string.
///
/// Malformed input yields the no-data shape with the parse failure in the
/// description.
pub fn remaining_time_from_str<T: Timelike>(
    input: &str,
    now: &T,
    rules: &FlexTimeRules,
) -> RemainingTimeResult {
    match parse_punch(input) {
        Ok(clock_in) => calculate_remaining_time(clock_in, now, rules),
        Err(err) => RemainingTimeResult::no_data(format!("Calculation error: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};

    fn t(s: &str) -> Option<TimeOfDay> {
        Some(s.parse().unwrap())
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn rules() -> FlexTimeRules {
        FlexTimeRules::default()
    }

    #[test]
    fn test_remaining_before_expected_clock_out() {
        let result = calculate_remaining_time(t("09:00"), &at(9, 5), &rules());

        assert_eq!(result.expected_clock_out, Some(TimeOfDay::hm(18, 15)));
        assert_eq!(result.remaining_minutes, 550);
        assert_eq!(result.remaining_time.as_deref(), Some("09:10"));
        assert!(!result.is_overtime);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.description, "9 hours 10 minutes left");
    }

    #[test]
    fn test_exactly_at_expected_clock_out_is_overtime() {
        let result = calculate_remaining_time(t("08:00"), &at(17, 45), &rules());

        assert_eq!(result.remaining_time.as_deref(), Some("00:00"));
        assert_eq!(result.remaining_minutes, 0);
        assert!(result.is_overtime);
        assert_eq!(result.overtime_minutes, 0);
    }

    #[test]
    fn test_overtime_after_expected_clock_out() {
        let result = calculate_remaining_time(t("10:30"), &at(19, 30), &rules());

        assert!(result.is_overtime);
        assert_eq!(result.overtime_minutes, 45);
        assert_eq!(result.remaining_time.as_deref(), Some("00:00"));
        assert_eq!(result.description, "Overtime 45 minutes");
    }

    #[test]
    fn test_seconds_are_ignored() {
        let now = NaiveTime::from_hms_opt(18, 14, 59).unwrap();
        let result = calculate_remaining_time(t("09:00"), &now, &rules());
        assert_eq!(result.remaining_minutes, 1);
    }

    #[test]
    fn test_accepts_datetime() {
        let now =
            NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let result = calculate_remaining_time(t("08:45"), &now, &rules());
        assert_eq!(result.remaining_minutes, 60);
    }

    #[test]
    fn test_no_clock_in() {
        let result = calculate_remaining_time(None, &at(12, 0), &rules());

        assert_eq!(result.remaining_time, None);
        assert_eq!(result.remaining_minutes, 0);
        assert!(!result.is_overtime);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.expected_clock_out, None);
    }

    #[test]
    fn test_from_str_malformed() {
        let result = remaining_time_from_str("noon", &at(12, 0), &rules());

        assert_eq!(result.remaining_time, None);
        assert!(!result.is_overtime);
        assert!(result.description.contains("noon"));
    }

    #[test]
    fn test_countdown_is_monotonic() {
        let rules = rules();
        let mut previous = u32::MAX;
        for minute in (9 * 60)..(18 * 60) {
            let now = at(minute / 60, minute % 60);
            let result = calculate_remaining_time(t("09:00"), &now, &rules);
            assert!(result.remaining_minutes < previous || result.is_overtime);
            previous = result.remaining_minutes;
        }
    }
}
