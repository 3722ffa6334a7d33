//! Per-day reports built from attendance records.
//!
//! These functions combine the individual calculations into the views the
//! presentation layer shows: the history list, the abnormal-record list with
//! leave suggestions, and today's countdown.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FlexTimeRules;
use crate::models::{AttendanceRecord, AttendanceStatus, Locale, TimeOfDay};

use super::clock_in_analysis::{ClockInAnalysis, analyze_clock_in};
use super::expected_clock_out::{ExpectedClockOutResult, calculate_expected_clock_out};
use super::leave_strategy::{LeaveStrategyResult, calculate_leave_strategy};
use super::remaining_time::{RemainingTimeResult, calculate_remaining_time};
use super::time_utils::{format_date, is_working_day, weekday_label};
use super::work_hours::{calculate_work_minutes, format_work_hours};

/// Everything computed for a single attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    /// The record date.
    pub date: NaiveDate,
    /// The date as `YYYY/MM/DD`.
    pub date_display: String,
    /// Localized weekday name.
    pub weekday: String,
    /// Whether the date falls on Monday to Friday.
    pub is_working_day: bool,
    /// Upstream status.
    pub status: AttendanceStatus,
    /// Arrival punch.
    pub punch_in: Option<TimeOfDay>,
    /// Departure punch.
    pub punch_out: Option<TimeOfDay>,
    /// Worked minutes, if both punches exist.
    pub work_minutes: Option<u32>,
    /// Worked duration for display.
    pub work_hours: String,
    /// Expected clock-out based on the arrival punch.
    pub expected_clock_out: ExpectedClockOutResult,
    /// Leave suggestion, present for abnormal records only.
    pub leave_strategy: Option<LeaveStrategyResult>,
}

/// Builds the report for one record.
pub fn build_daily_report(
    record: &AttendanceRecord,
    rules: &FlexTimeRules,
    locale: Locale,
) -> DailyReport {
    let leave_strategy = (record.status == AttendanceStatus::Abnormal)
        .then(|| calculate_leave_strategy(record.punch_in, record.punch_out, rules));

    DailyReport {
        date: record.date,
        date_display: format_date(record.date),
        weekday: weekday_label(record.date, locale).to_string(),
        is_working_day: is_working_day(record.date),
        status: record.status,
        punch_in: record.punch_in,
        punch_out: record.punch_out,
        work_minutes: calculate_work_minutes(record.punch_in, record.punch_out),
        work_hours: format_work_hours(record.punch_in, record.punch_out, locale),
        expected_clock_out: calculate_expected_clock_out(record.punch_in, rules),
        leave_strategy,
    }
}

/// Builds reports for all records, newest first.
pub fn build_history(
    records: &[AttendanceRecord],
    rules: &FlexTimeRules,
    locale: Locale,
) -> Vec<DailyReport> {
    let mut reports: Vec<DailyReport> = records
        .iter()
        .map(|record| build_daily_report(record, rules, locale))
        .collect();
    reports.sort_by(|a, b| b.date.cmp(&a.date));
    reports
}

/// Builds reports for abnormal records dated within the last `search_days`
/// days up to and including `today`, newest first.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::abnormal_reports;
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::{AttendanceRecord, AttendanceStatus, Locale, TimeOfDay};
/// use chrono::NaiveDate;
///
/// let record = AttendanceRecord {
///     employee_id: "E1024".to_string(),
///     name: "Lin".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     status: AttendanceStatus::Abnormal,
///     punch_in: Some(TimeOfDay::hm(10, 0)),
///     punch_out: Some(TimeOfDay::hm(18, 45)),
///     leave_time: None,
///     dept_name: "RD".to_string(),
/// };
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let reports = abnormal_reports(&[record], today, 45, &FlexTimeRules::default(), Locale::EnUs);
///
/// assert_eq!(reports.len(), 1);
/// assert_eq!(reports[0].leave_strategy.as_ref().unwrap().total_leave_minutes, 30);
/// ```
pub fn abnormal_reports(
    records: &[AttendanceRecord],
    today: NaiveDate,
    search_days: u32,
    rules: &FlexTimeRules,
    locale: Locale,
) -> Vec<DailyReport> {
    let earliest = today
        .checked_sub_days(Days::new(u64::from(search_days)))
        .unwrap_or(NaiveDate::MIN);

    let abnormal: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Abnormal)
        .filter(|r| r.date >= earliest && r.date <= today)
        .cloned()
        .collect();

    debug!(
        total = records.len(),
        abnormal = abnormal.len(),
        %earliest,
        %today,
        "Filtered abnormal attendance records"
    );

    build_history(&abnormal, rules, locale)
}

/// The live view for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaySummary {
    /// The current date.
    pub date: NaiveDate,
    /// Whether today is Monday to Friday.
    pub is_working_day: bool,
    /// Today's arrival punch.
    pub punch_in: Option<TimeOfDay>,
    /// Today's departure punch.
    pub punch_out: Option<TimeOfDay>,
    /// Classification of the arrival.
    pub clock_in: ClockInAnalysis,
    /// Expected clock-out.
    pub expected_clock_out: ExpectedClockOutResult,
    /// Countdown as of `now`.
    pub remaining: RemainingTimeResult,
}

/// Summarises today's record as of `now`.
///
/// When no record exists for `now`'s date the summary reports no punches.
pub fn today_summary(
    records: &[AttendanceRecord],
    now: NaiveDateTime,
    rules: &FlexTimeRules,
) -> TodaySummary {
    let today = now.date();
    let record = records.iter().find(|r| r.date == today);
    let punch_in = record.and_then(|r| r.punch_in);

    TodaySummary {
        date: today,
        is_working_day: is_working_day(today),
        punch_in,
        punch_out: record.and_then(|r| r.punch_out),
        clock_in: analyze_clock_in(punch_in, rules),
        expected_clock_out: calculate_expected_clock_out(punch_in, rules),
        remaining: calculate_remaining_time(punch_in, &now, rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{ClockInKind, ClockOutRule};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(day: &str, status: AttendanceStatus, punch_in: &str, punch_out: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "E1024".to_string(),
            name: "Lin".to_string(),
            date: date(day),
            status,
            punch_in: crate::models::parse_punch(punch_in).unwrap(),
            punch_out: crate::models::parse_punch(punch_out).unwrap(),
            leave_time: None,
            dept_name: "RD".to_string(),
        }
    }

    fn sample_records() -> Vec<AttendanceRecord> {
        vec![
            record("2026-01-12", AttendanceStatus::Normal, "08:40", "17:55"),
            record("2026-01-14", AttendanceStatus::Abnormal, "10:00", "17:00"),
            record("2026-01-13", AttendanceStatus::Abnormal, "09:00", "17:50"),
            record("2025-10-01", AttendanceStatus::Abnormal, "10:00", "18:45"),
        ]
    }

    #[test]
    fn test_daily_report_for_normal_record() {
        let report = build_daily_report(
            &record("2026-01-12", AttendanceStatus::Normal, "08:40", "17:55"),
            &FlexTimeRules::default(),
            Locale::EnUs,
        );

        assert_eq!(report.date_display, "2026/01/12");
        assert_eq!(report.weekday, "Monday");
        assert!(report.is_working_day);
        assert_eq!(report.work_minutes, Some(555));
        assert_eq!(report.work_hours, "9 hours 15 minutes");
        assert_eq!(report.expected_clock_out.rule, ClockOutRule::Flexible);
        assert!(report.leave_strategy.is_none());
    }

    #[test]
    fn test_daily_report_for_abnormal_record_has_strategy() {
        let report = build_daily_report(
            &record("2026-01-14", AttendanceStatus::Abnormal, "10:00", "17:00"),
            &FlexTimeRules::default(),
            Locale::ZhTw,
        );

        assert_eq!(report.weekday, "星期三");
        let strategy = report.leave_strategy.unwrap();
        assert_eq!(strategy.segments.len(), 2);
        assert_eq!(strategy.total_leave_minutes, 150);
    }

    #[test]
    fn test_history_sorted_newest_first() {
        let reports = build_history(&sample_records(), &FlexTimeRules::default(), Locale::EnUs);

        let dates: Vec<NaiveDate> = reports.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                date("2026-01-14"),
                date("2026-01-13"),
                date("2026-01-12"),
                date("2025-10-01")
            ]
        );
    }

    #[test]
    fn test_abnormal_reports_filters_status_and_window() {
        let reports = abnormal_reports(
            &sample_records(),
            date("2026-01-15"),
            45,
            &FlexTimeRules::default(),
            Locale::EnUs,
        );

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.status == AttendanceStatus::Abnormal));
        assert_eq!(reports[0].date, date("2026-01-14"));
        assert_eq!(reports[1].date, date("2026-01-13"));
    }

    #[test]
    fn test_abnormal_reports_window_beyond_calendar_start() {
        let reports = abnormal_reports(
            &sample_records(),
            date("2026-01-15"),
            u32::MAX,
            &FlexTimeRules::default(),
            Locale::EnUs,
        );

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].date, date("2025-10-01"));
    }

    #[test]
    fn test_abnormal_reports_excludes_future_records() {
        let records = vec![record("2026-01-20", AttendanceStatus::Abnormal, "10:00", "18:45")];
        let reports = abnormal_reports(
            &records,
            date("2026-01-15"),
            45,
            &FlexTimeRules::default(),
            Locale::EnUs,
        );
        assert!(reports.is_empty());
    }

    #[test]
    fn test_today_summary_with_record() {
        let records = vec![record("2026-01-15", AttendanceStatus::Normal, "09:10", "--:--")];
        let now = NaiveDateTime::parse_from_str("2026-01-15 17:25:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();

        let summary = today_summary(&records, now, &FlexTimeRules::default());

        assert!(summary.is_working_day);
        assert_eq!(summary.punch_in, Some(TimeOfDay::hm(9, 10)));
        assert_eq!(summary.punch_out, None);
        assert_eq!(summary.clock_in.kind, ClockInKind::Flexible);
        assert_eq!(summary.expected_clock_out.expected_time_display(), "18:25");
        assert_eq!(summary.remaining.remaining_minutes, 60);
    }

    #[test]
    fn test_today_summary_without_record() {
        let now = NaiveDateTime::parse_from_str("2026-01-17 10:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();

        let summary = today_summary(&sample_records(), now, &FlexTimeRules::default());

        assert!(!summary.is_working_day);
        assert_eq!(summary.punch_in, None);
        assert_eq!(summary.clock_in.kind, ClockInKind::None);
        assert_eq!(summary.expected_clock_out.rule, ClockOutRule::Unknown);
        assert_eq!(summary.remaining.remaining_time, None);
    }
}
