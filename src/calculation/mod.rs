//! Calculation logic for the flexible working hours engine.
//!
//! This module contains the time conversion helpers, the expected clock-out
//! prediction, the remaining time countdown, the two-phase leave
//! compensation strategy, clock-in classification and the per-day reports
//! that combine them for an attendance history.

mod attendance_report;
mod clock_in_analysis;
mod expected_clock_out;
mod leave_strategy;
mod remaining_time;
mod time_utils;
mod work_hours;

pub use attendance_report::{
    DailyReport, TodaySummary, abnormal_reports, build_daily_report, build_history, today_summary,
};
pub use clock_in_analysis::{
    ClockInAnalysis, ClockInKind, FlexRuleLine, FlexTimeRulesDescription, analyze_clock_in,
    describe_rules,
};
pub use expected_clock_out::{
    ClockOutRule, ExpectedClockOutResult, calculate_expected_clock_out,
    expected_clock_out_from_str,
};
pub use leave_strategy::{
    LeaveEfficiency, LeaveSegment, LeaveSegmentKind, LeaveStrategyResult,
    calculate_leave_strategy, leave_strategy_from_str,
};
pub use remaining_time::{RemainingTimeResult, calculate_remaining_time, remaining_time_from_str};
pub use time_utils::{
    format_date, format_duration, format_duration_clock, is_working_day, minutes_to_time_string,
    parse_time_to_minutes, weekday_label,
};
pub use work_hours::{calculate_work_minutes, format_work_hours};
