//! Time parsing and formatting helpers shared by every calculation.
//!
//! All minute arithmetic in the engine goes through these helpers so that
//! midnight wrapping and duration rendering stay consistent.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{Locale, TimeOfDay, parse_punch};

/// Parses `"HH:MM"` into minutes since midnight.
///
/// Returns `None` for `"--:--"`, empty or malformed input instead of failing.
/// Use [`parse_punch`] when the caller needs to distinguish the two.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::parse_time_to_minutes;
///
/// assert_eq!(parse_time_to_minutes("09:30"), Some(570));
/// assert_eq!(parse_time_to_minutes("--:--"), None);
/// assert_eq!(parse_time_to_minutes("nine"), None);
/// ```
pub fn parse_time_to_minutes(input: &str) -> Option<u32> {
    parse_punch(input).ok().flatten().map(TimeOfDay::minutes)
}

/// Renders a minute count as `"HH:MM"`, wrapping modulo one day.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::minutes_to_time_string;
///
/// assert_eq!(minutes_to_time_string(1080), "18:00");
/// assert_eq!(minutes_to_time_string(1440 + 75), "01:15");
/// ```
pub fn minutes_to_time_string(minutes: i32) -> String {
    TimeOfDay::from_minutes_wrapping(minutes).to_string()
}

/// Renders a duration as `"HH:MM"` without wrapping at one day.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::format_duration_clock;
///
/// assert_eq!(format_duration_clock(90), "01:30");
/// assert_eq!(format_duration_clock(1500), "25:00");
/// ```
pub fn format_duration_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Renders a duration in whole hours and minutes for the given locale.
///
/// Zero components are omitted, except that a zero duration is rendered as
/// zero minutes.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::format_duration;
/// use flextime_engine::models::Locale;
///
/// assert_eq!(format_duration(150, Locale::EnUs), "2 hours 30 minutes");
/// assert_eq!(format_duration(120, Locale::ZhTw), "2小時");
/// assert_eq!(format_duration(45, Locale::ZhTw), "45分鐘");
/// ```
pub fn format_duration(minutes: u32, locale: Locale) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match locale {
        Locale::ZhTw => match (hours, mins) {
            (0, m) => format!("{}分鐘", m),
            (h, 0) => format!("{}小時", h),
            (h, m) => format!("{}小時{}分鐘", h, m),
        },
        Locale::EnUs => match (hours, mins) {
            (0, m) => format!("{} {}", m, plural(m, "minute")),
            (h, 0) => format!("{} {}", h, plural(h, "hour")),
            (h, m) => format!("{} {} {} {}", h, plural(h, "hour"), m, plural(m, "minute")),
        },
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

/// Whether the date is a working day. Monday to Friday only; public holidays
/// are not considered.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::is_working_day;
/// use chrono::NaiveDate;
///
/// // 2026-01-16 is a Friday, 2026-01-17 a Saturday
/// assert!(is_working_day(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()));
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()));
/// ```
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Renders a date as `YYYY/MM/DD`, the attendance system's format.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// The localized name of the date's weekday.
pub fn weekday_label(date: NaiveDate, locale: Locale) -> &'static str {
    let index = date.weekday().num_days_from_monday() as usize;
    match locale {
        Locale::ZhTw => {
            ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"][index]
        }
        Locale::EnUs => [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ][index],
    }
}
