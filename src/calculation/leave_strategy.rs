//! Leave compensation strategy.
//!
//! Given the actual arrival and departure of a day, this module works out
//! how much paid leave has to be filed and for which windows, so that the
//! day satisfies the required working minutes.
//!
//! Lateness and early departure are corrected independently:
//!
//! 1. **Morning.** Arriving after `flex_end` requires leave covering
//!    `[flex_end, punch_in)`, rounded up to the leave unit. The arrival is then
//!    treated as `flex_end`.
//! 2. **Afternoon.** The day must last until adjusted arrival +
//!    `required_work_minutes`. Leaving before that requires leave from the
//!    departure onwards, rounded up to the leave unit. The segment never
//!    extends past `late_clock_out`.
//!
//! Leave is always rounded up, never down. The minutes added by rounding are
//! reported as `wasted_minutes`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FlexTimeRules;
use crate::models::{TimeOfDay, parse_punch};

/// Which end of the day a leave segment compensates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveSegmentKind {
    /// Late arrival.
    Morning,
    /// Early departure.
    Afternoon,
}

/// A single block of leave to file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSegment {
    /// Which end of the day the segment covers.
    #[serde(rename = "type")]
    pub kind: LeaveSegmentKind,
    /// Start of the leave window.
    pub start_time: TimeOfDay,
    /// End of the leave window.
    pub end_time: TimeOfDay,
    /// Leave to file, a multiple of the leave unit.
    pub minutes: u32,
    /// `minutes` expressed in hours.
    pub hours: Decimal,
    /// Why the segment is needed.
    pub reason: String,
}

/// How much leave was lost to rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveEfficiency {
    /// No minutes lost.
    Exact,
    /// Some minutes lost, within the warning threshold.
    Reasonable,
    /// More minutes lost than the warning threshold.
    Wasteful,
}

/// The leave required for a day and where to place it.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::{calculate_leave_strategy, LeaveSegmentKind};
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let result = calculate_leave_strategy(
///     Some(TimeOfDay::hm(10, 0)),
///     Some(TimeOfDay::hm(18, 45)),
///     &FlexTimeRules::default(),
/// );
///
/// assert!(result.need_leave);
/// assert_eq!(result.total_leave_minutes, 30);
/// assert_eq!(result.segments.len(), 1);
/// assert_eq!(result.segments[0].kind, LeaveSegmentKind::Morning);
/// assert_eq!(result.segments[0].start_time.to_string(), "09:30");
/// assert_eq!(result.segments[0].end_time.to_string(), "10:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStrategyResult {
    /// Whether any leave must be filed.
    pub need_leave: bool,
    /// Sum of all segment minutes.
    pub total_leave_minutes: u32,
    /// `total_leave_minutes` expressed in hours.
    pub total_leave_hours: Decimal,
    /// Leave segments in chronological order, morning first.
    pub segments: Vec<LeaveSegment>,
    /// The real shortfall before rounding.
    pub deficit: u32,
    /// Minutes added by rounding up to the leave unit.
    pub wasted_minutes: u32,
    /// Minutes between punch-in and punch-out, clamped at zero.
    pub actual_duration_minutes: u32,
    /// Rounding verdict for the presentation layer.
    pub efficiency: LeaveEfficiency,
    /// Human-readable summary.
    pub description: String,
}

impl LeaveStrategyResult {
    fn no_leave(actual_duration_minutes: u32, description: String) -> Self {
        Self {
            need_leave: false,
            total_leave_minutes: 0,
            total_leave_hours: Decimal::ZERO,
            segments: Vec::new(),
            deficit: 0,
            wasted_minutes: 0,
            actual_duration_minutes,
            efficiency: LeaveEfficiency::Exact,
            description,
        }
    }
}

fn round_up_to_unit(minutes: u32, unit: u32) -> u32 {
    minutes.div_ceil(unit).saturating_mul(unit)
}

fn minutes_to_hours(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2).normalize()
}

fn rate_efficiency(wasted_minutes: u32, rules: &FlexTimeRules) -> LeaveEfficiency {
    if wasted_minutes == 0 {
        LeaveEfficiency::Exact
    } else if wasted_minutes <= rules.wasted_warning_minutes {
        LeaveEfficiency::Reasonable
    } else {
        LeaveEfficiency::Wasteful
    }
}

/// Calculates the leave needed for a day with the given punches.
///
/// A missing punch on either end means the day cannot be evaluated yet and
/// no leave is suggested.
///
/// # Examples
///
/// ## Late arrival and early departure
///
/// ```
/// use flextime_engine::calculation::calculate_leave_strategy;
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let result = calculate_leave_strategy(
///     Some(TimeOfDay::hm(10, 0)),
///     Some(TimeOfDay::hm(17, 0)),
///     &FlexTimeRules::default(),
/// );
///
/// assert_eq!(result.segments.len(), 2);
/// assert_eq!(result.total_leave_minutes, 150);
/// assert_eq!(result.deficit, 135);
/// assert_eq!(result.wasted_minutes, 15);
/// // the afternoon segment stops at 18:45
/// assert_eq!(result.segments[1].end_time, TimeOfDay::hm(18, 45));
/// ```
///
/// ## Enough hours
///
/// ```
/// use flextime_engine::calculation::calculate_leave_strategy;
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let result = calculate_leave_strategy(
///     Some(TimeOfDay::hm(8, 50)),
///     Some(TimeOfDay::hm(18, 10)),
///     &FlexTimeRules::default(),
/// );
///
/// assert!(!result.need_leave);
/// assert!(result.segments.is_empty());
/// ```
pub fn calculate_leave_strategy(
    punch_in: Option<TimeOfDay>,
    punch_out: Option<TimeOfDay>,
    rules: &FlexTimeRules,
) -> LeaveStrategyResult {
    let (Some(punch_in), Some(punch_out)) = (punch_in, punch_out) else {
        return LeaveStrategyResult::no_leave(0, "Incomplete punch data".to_string());
    };

    let unit = rules.leave_unit_minutes;
    let mut segments = Vec::with_capacity(2);
    let mut wasted_minutes: u32 = 0;
    let mut adjusted_clock_in = punch_in;

    if punch_in > rules.flex_end {
        let late_minutes = punch_in.minutes() - rules.flex_end.minutes();
        let leave_minutes = round_up_to_unit(late_minutes, unit);
        wasted_minutes = wasted_minutes.saturating_add(leave_minutes - late_minutes);

        segments.push(LeaveSegment {
            kind: LeaveSegmentKind::Morning,
            start_time: rules.flex_end,
            end_time: punch_in,
            minutes: leave_minutes,
            hours: minutes_to_hours(leave_minutes),
            reason: "Late arrival compensation".to_string(),
        });
        adjusted_clock_in = rules.flex_end;
    }

    let expected_clock_out = adjusted_clock_in
        .minutes()
        .saturating_add(rules.required_work_minutes);

    if punch_out.minutes() < expected_clock_out {
        let shortfall = expected_clock_out - punch_out.minutes();
        let leave_minutes = round_up_to_unit(shortfall, unit);
        wasted_minutes = wasted_minutes.saturating_add(leave_minutes - shortfall);

        let end_minutes = punch_out
            .minutes()
            .saturating_add(leave_minutes)
            .min(rules.late_clock_out.minutes())
            .max(punch_out.minutes());

        segments.push(LeaveSegment {
            kind: LeaveSegmentKind::Afternoon,
            start_time: punch_out,
            end_time: TimeOfDay::from_day_minutes(end_minutes),
            minutes: leave_minutes,
            hours: minutes_to_hours(leave_minutes),
            reason: "Early departure compensation".to_string(),
        });
    }

    let actual_duration_minutes = punch_out.minutes().saturating_sub(punch_in.minutes());

    if segments.is_empty() {
        return LeaveStrategyResult::no_leave(
            actual_duration_minutes,
            "Sufficient working hours, no leave needed".to_string(),
        );
    }

    let total_leave_minutes = segments
        .iter()
        .fold(0u32, |total, s| total.saturating_add(s.minutes));
    let total_leave_hours = minutes_to_hours(total_leave_minutes);

    let description = match segments.as_slice() {
        [only] => format!(
            "Leave {} hours needed ({} - {})",
            only.hours, only.start_time, only.end_time
        ),
        [morning, afternoon] => format!(
            "Leave {} hours needed (morning: {} - {}, afternoon: {} - {})",
            total_leave_hours,
            morning.start_time,
            morning.end_time,
            afternoon.start_time,
            afternoon.end_time
        ),
        _ => format!("Leave {} hours needed", total_leave_hours),
    };

    debug!(
        punch_in = %punch_in,
        punch_out = %punch_out,
        segments = segments.len(),
        total_leave_minutes,
        wasted_minutes,
        "Calculated leave strategy"
    );

    LeaveStrategyResult {
        need_leave: true,
        total_leave_minutes,
        total_leave_hours,
        segments,
        deficit: total_leave_minutes - wasted_minutes,
        wasted_minutes,
        actual_duration_minutes,
        efficiency: rate_efficiency(wasted_minutes, rules),
        description,
    }
}

/// Calculates the leave strategy from raw punch strings.
///
/// Malformed input yields a no-leave result describing the parse failure.
pub fn leave_strategy_from_str(
    punch_in: &str,
    punch_out: &str,
    rules: &FlexTimeRules,
) -> LeaveStrategyResult {
    match (parse_punch(punch_in), parse_punch(punch_out)) {
        (Ok(punch_in), Ok(punch_out)) => calculate_leave_strategy(punch_in, punch_out, rules),
        (Err(err), _) | (_, Err(err)) => {
            LeaveStrategyResult::no_leave(0, format!("Calculation error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn t(s: &str) -> Option<TimeOfDay> {
        Some(s.parse().unwrap())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn strategy(punch_in: &str, punch_out: &str) -> LeaveStrategyResult {
        calculate_leave_strategy(t(punch_in), t(punch_out), &FlexTimeRules::default())
    }

    // ==========================================================================
    // Morning compensation
    // ==========================================================================

    #[test]
    fn test_late_by_exactly_one_unit() {
        let result = strategy("10:00", "18:45");

        assert!(result.need_leave);
        assert_eq!(result.segments.len(), 1);
        let morning = &result.segments[0];
        assert_eq!(morning.kind, LeaveSegmentKind::Morning);
        assert_eq!(morning.start_time, TimeOfDay::hm(9, 30));
        assert_eq!(morning.end_time, TimeOfDay::hm(10, 0));
        assert_eq!(morning.minutes, 30);
        assert_eq!(morning.hours, dec("0.5"));
        assert_eq!(result.total_leave_minutes, 30);
        assert_eq!(result.deficit, 30);
        assert_eq!(result.wasted_minutes, 0);
        assert_eq!(result.efficiency, LeaveEfficiency::Exact);
    }

    #[test]
    fn test_late_arrival_rounds_up() {
        let result = strategy("10:10", "18:45");

        let morning = &result.segments[0];
        assert_eq!(morning.minutes, 60);
        assert_eq!(morning.end_time, TimeOfDay::hm(10, 10));
        assert_eq!(result.deficit, 40);
        assert_eq!(result.wasted_minutes, 20);
        assert_eq!(result.efficiency, LeaveEfficiency::Wasteful);
    }

    #[test]
    fn test_arrival_at_flex_end_needs_no_morning_leave() {
        let result = strategy("09:30", "18:45");
        assert!(!result.need_leave);
        assert_eq!(result.actual_duration_minutes, 555);
    }

    // ==========================================================================
    // Afternoon compensation
    // ==========================================================================

    #[test]
    fn test_early_departure_within_flex_window() {
        // expected 18:15, short by 75 minutes
        let result = strategy("09:00", "17:00");

        assert_eq!(result.segments.len(), 1);
        let afternoon = &result.segments[0];
        assert_eq!(afternoon.kind, LeaveSegmentKind::Afternoon);
        assert_eq!(afternoon.start_time, TimeOfDay::hm(17, 0));
        assert_eq!(afternoon.end_time, TimeOfDay::hm(18, 30));
        assert_eq!(afternoon.minutes, 90);
        assert_eq!(afternoon.hours, dec("1.5"));
        assert_eq!(result.deficit, 75);
        assert_eq!(result.wasted_minutes, 15);
        assert_eq!(result.efficiency, LeaveEfficiency::Wasteful);
    }

    #[test]
    fn test_small_shortfall_is_reasonable() {
        // expected 18:15, short by 25 minutes
        let result = strategy("09:00", "17:50");

        assert_eq!(result.total_leave_minutes, 30);
        assert_eq!(result.wasted_minutes, 5);
        assert_eq!(result.efficiency, LeaveEfficiency::Reasonable);
    }

    #[test]
    fn test_early_arrival_counts_from_actual_punch() {
        // arrival is not moved to 08:30, expected is 08:00 + 9h15m = 17:15
        let result = strategy("08:00", "17:00");

        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].minutes, 30);
        assert_eq!(result.segments[0].end_time, TimeOfDay::hm(17, 30));
        assert_eq!(result.deficit, 15);
    }

    #[test]
    fn test_afternoon_segment_capped_at_late_clock_out() {
        let result = strategy("10:00", "17:00");

        assert_eq!(result.segments.len(), 2);
        let afternoon = &result.segments[1];
        assert_eq!(afternoon.minutes, 120);
        assert_eq!(afternoon.start_time, TimeOfDay::hm(17, 0));
        assert_eq!(afternoon.end_time, TimeOfDay::hm(18, 45));
    }

    // ==========================================================================
    // Combined and aggregate behaviour
    // ==========================================================================

    #[test]
    fn test_two_segments_are_chronological() {
        let result = strategy("10:00", "17:00");

        assert_eq!(result.segments[0].kind, LeaveSegmentKind::Morning);
        assert_eq!(result.segments[1].kind, LeaveSegmentKind::Afternoon);
        assert_eq!(result.total_leave_minutes, 150);
        assert_eq!(result.total_leave_hours, dec("2.5"));
        assert_eq!(result.deficit, 135);
        assert_eq!(result.wasted_minutes, 15);
        assert!(result.description.contains("morning: 09:30 - 10:00"));
        assert!(result.description.contains("afternoon: 17:00 - 18:45"));
    }

    #[test]
    fn test_sufficient_hours() {
        let result = strategy("08:00", "17:15");

        assert!(!result.need_leave);
        assert!(result.segments.is_empty());
        assert_eq!(result.total_leave_minutes, 0);
        assert_eq!(result.actual_duration_minutes, 555);
        assert_eq!(result.description, "Sufficient working hours, no leave needed");
    }

    #[test]
    fn test_departure_before_arrival_clamps_duration() {
        let result = strategy("10:00", "09:00");

        assert_eq!(result.actual_duration_minutes, 0);
        assert!(result.need_leave);
        let afternoon = &result.segments[1];
        assert!(afternoon.end_time >= afternoon.start_time);
        assert_eq!(result.total_leave_minutes - result.deficit, result.wasted_minutes);
    }

    #[test]
    fn test_missing_punch_out() {
        let result = calculate_leave_strategy(t("09:00"), None, &FlexTimeRules::default());

        assert!(!result.need_leave);
        assert_eq!(result.description, "Incomplete punch data");
    }

    #[test]
    fn test_missing_punch_in() {
        let result = calculate_leave_strategy(None, t("18:00"), &FlexTimeRules::default());
        assert!(!result.need_leave);
        assert_eq!(result.actual_duration_minutes, 0);
    }

    #[test]
    fn test_single_segment_description() {
        let result = strategy("09:00", "17:00");
        assert_eq!(result.description, "Leave 1.5 hours needed (17:00 - 18:30)");
    }

    #[test]
    fn test_from_str_sentinel() {
        let result = leave_strategy_from_str("--:--", "18:00", &FlexTimeRules::default());
        assert_eq!(result.description, "Incomplete punch data");
    }

    #[test]
    fn test_from_str_malformed() {
        let result = leave_strategy_from_str("09:00", "6pm", &FlexTimeRules::default());
        assert!(!result.need_leave);
        assert!(result.description.contains("6pm"));
    }

    #[test]
    fn test_custom_leave_unit() {
        let rules = FlexTimeRules {
            leave_unit_minutes: 60,
            ..FlexTimeRules::default()
        };
        let result = calculate_leave_strategy(t("10:00"), t("18:45"), &rules);

        assert_eq!(result.total_leave_minutes, 60);
        assert_eq!(result.wasted_minutes, 30);
    }

    #[test]
    fn test_unbounded_requirement_does_not_overflow() {
        let rules = FlexTimeRules {
            required_work_minutes: u32::MAX,
            ..FlexTimeRules::default()
        };
        let result = calculate_leave_strategy(t("09:00"), t("18:00"), &rules);

        assert!(result.need_leave);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].end_time, TimeOfDay::hm(18, 45));
        assert_eq!(result.segments[0].minutes % 30, 0);
        assert_eq!(result.wasted_minutes, 15);
    }

    #[test]
    fn test_same_inputs_same_result() {
        assert_eq!(strategy("10:20", "16:05"), strategy("10:20", "16:05"));
    }

    #[test]
    fn test_serialization() {
        let result = strategy("10:00", "18:45");
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"type\":\"morning\""));
        assert!(json.contains("\"start_time\":\"09:30\""));
        assert!(json.contains("\"hours\":\"0.5\""));
        assert!(json.contains("\"efficiency\":\"exact\""));

        let back: LeaveStrategyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
