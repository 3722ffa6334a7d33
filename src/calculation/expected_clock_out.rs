//! Expected clock-out prediction.
//!
//! This module decides when an employee may leave based on the arrival punch
//! alone:
//!
//! | Arrival                       | Departure                      | Rule       |
//! |-------------------------------|--------------------------------|------------|
//! | at or before `flex_start`     | `standard_clock_out`           | `early`    |
//! | after `flex_start`, at or before `flex_end` | arrival + `required_work_minutes` | `flexible` |
//! | after `flex_end`              | `late_clock_out`               | `late`     |
//!
//! Both boundaries are inclusive on the earlier branch: an 08:30 punch is
//! `early` and a 09:30 punch is `flexible`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FlexTimeRules;
use crate::models::{Locale, TimeOfDay, display_or_sentinel, parse_punch};

use super::time_utils::format_duration;

/// Which branch of the policy produced the expected clock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockOutRule {
    /// Arrived at or before the start of the flexible window.
    Early,
    /// Arrived inside the flexible window.
    Flexible,
    /// Arrived after the flexible window.
    Late,
    /// No arrival punch yet.
    Unknown,
    /// The arrival punch could not be parsed.
    Error,
}

/// The predicted departure for a day.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::{calculate_expected_clock_out, ClockOutRule};
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let rules = FlexTimeRules::default();
/// let result = calculate_expected_clock_out(Some(TimeOfDay::hm(8, 45)), &rules);
///
/// assert_eq!(result.rule, ClockOutRule::Flexible);
/// assert_eq!(result.expected_time, Some(TimeOfDay::hm(18, 0)));
/// assert_eq!(result.total_working_minutes, 555);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedClockOutResult {
    /// The arrival punch the prediction is based on.
    pub clock_in: Option<TimeOfDay>,
    /// Predicted departure, or `None` without a usable arrival punch.
    pub expected_time: Option<TimeOfDay>,
    /// Minutes between arrival and predicted departure.
    pub total_working_minutes: u32,
    /// Whole hours of `total_working_minutes`.
    pub working_hours: u32,
    /// Remaining minutes of `total_working_minutes` after whole hours.
    pub working_minutes: u32,
    /// The policy branch applied.
    pub rule: ClockOutRule,
    /// Whether the arrival fell inside the flexible window.
    pub is_flex_time: bool,
    /// Human-readable explanation of the result.
    pub description: String,
}

impl ExpectedClockOutResult {
    fn without_prediction(rule: ClockOutRule, description: String) -> Self {
        Self {
            clock_in: None,
            expected_time: None,
            total_working_minutes: 0,
            working_hours: 0,
            working_minutes: 0,
            rule,
            is_flex_time: false,
            description,
        }
    }

    /// The expected departure as `"HH:MM"`, or `"--:--"` when unknown.
    pub fn expected_time_display(&self) -> String {
        display_or_sentinel(self.expected_time)
    }
}

/// Applies the policy table to an arrival punch.
///
/// Returns the branch and the departure in minutes since midnight. The value
/// is not wrapped, so callers comparing against the current time keep the
/// correct ordering even under a configuration that ends past midnight.
pub(crate) fn resolve_clock_out(clock_in: TimeOfDay, rules: &FlexTimeRules) -> (ClockOutRule, u32) {
    if clock_in <= rules.flex_start {
        (ClockOutRule::Early, rules.standard_clock_out.minutes())
    } else if clock_in <= rules.flex_end {
        (
            ClockOutRule::Flexible,
            clock_in.minutes().saturating_add(rules.required_work_minutes),
        )
    } else {
        (ClockOutRule::Late, rules.late_clock_out.minutes())
    }
}

/// Predicts the departure time for an arrival punch.
///
/// This function does not depend on the current time. A missing punch yields
/// [`ClockOutRule::Unknown`] with no expected time.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::{calculate_expected_clock_out, ClockOutRule};
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let rules = FlexTimeRules::default();
///
/// let early = calculate_expected_clock_out(Some(TimeOfDay::hm(8, 25)), &rules);
/// assert_eq!(early.expected_time_display(), "17:45");
///
/// let late = calculate_expected_clock_out(Some(TimeOfDay::hm(10, 0)), &rules);
/// assert_eq!(late.rule, ClockOutRule::Late);
/// assert_eq!(late.expected_time_display(), "18:45");
///
/// let missing = calculate_expected_clock_out(None, &rules);
/// assert_eq!(missing.expected_time_display(), "--:--");
/// ```
pub fn calculate_expected_clock_out(
    clock_in: Option<TimeOfDay>,
    rules: &FlexTimeRules,
) -> ExpectedClockOutResult {
    let Some(clock_in) = clock_in else {
        return ExpectedClockOutResult::without_prediction(
            ClockOutRule::Unknown,
            "Not clocked in yet".to_string(),
        );
    };

    let (rule, expected_minutes) = resolve_clock_out(clock_in, rules);
    let expected_time = TimeOfDay::from_day_minutes(expected_minutes);
    let total_working_minutes = expected_minutes.saturating_sub(clock_in.minutes());

    let description = match rule {
        ClockOutRule::Early => format!(
            "Clocked in at or before {}, leave at {}",
            rules.flex_start, rules.standard_clock_out
        ),
        ClockOutRule::Flexible => format!(
            "Clocked in within the flexible window, work {}",
            format_duration(rules.required_work_minutes, Locale::EnUs)
        ),
        _ => format!(
            "Clocked in after {}, leave at {}",
            rules.flex_end, rules.late_clock_out
        ),
    };

    debug!(
        clock_in = %clock_in,
        rule = ?rule,
        expected_time = %expected_time,
        "Resolved expected clock-out"
    );

    ExpectedClockOutResult {
        clock_in: Some(clock_in),
        expected_time: Some(expected_time),
        total_working_minutes,
        working_hours: total_working_minutes / 60,
        working_minutes: total_working_minutes % 60,
        rule,
        is_flex_time: rule == ClockOutRule::Flexible,
        description,
    }
}

/// Predicts the departure time from a raw punch string.
///
/// `"--:--"` or an empty string behave like a missing punch. Malformed input
/// produces [`ClockOutRule::Error`] with the parse failure in the
/// description; this function never fails.
///
/// ```
/// use flextime_engine::calculation::{expected_clock_out_from_str, ClockOutRule};
/// use flextime_engine::config::FlexTimeRules;
///
/// let result = expected_clock_out_from_str("nine-ish", &FlexTimeRules::default());
/// assert_eq!(result.rule, ClockOutRule::Error);
/// assert_eq!(result.expected_time, None);
/// ```
pub fn expected_clock_out_from_str(input: &str, rules: &FlexTimeRules) -> ExpectedClockOutResult {
    match parse_punch(input) {
        Ok(clock_in) => calculate_expected_clock_out(clock_in, rules),
        Err(err) => ExpectedClockOutResult::without_prediction(
            ClockOutRule::Error,
            format!("Calculation error: {}", err),
        ),
    }
}
