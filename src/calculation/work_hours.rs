//! Worked duration between two punches.

use crate::models::{Locale, NO_PUNCH, TimeOfDay};

use super::time_utils::format_duration;

/// Minutes between punch-in and punch-out.
///
/// Returns `None` when either punch is missing or the punch-out is not after
/// the punch-in.
///
/// ```
/// use flextime_engine::calculation::calculate_work_minutes;
/// use flextime_engine::models::TimeOfDay;
///
/// let worked = calculate_work_minutes(Some(TimeOfDay::hm(9, 0)), Some(TimeOfDay::hm(18, 15)));
/// assert_eq!(worked, Some(555));
/// assert_eq!(calculate_work_minutes(Some(TimeOfDay::hm(9, 0)), None), None);
/// ```
pub fn calculate_work_minutes(
    punch_in: Option<TimeOfDay>,
    punch_out: Option<TimeOfDay>,
) -> Option<u32> {
    let (punch_in, punch_out) = (punch_in?, punch_out?);
    (punch_out > punch_in).then(|| punch_out.minutes() - punch_in.minutes())
}

/// Renders the worked duration, or `"--:--"` when it cannot be computed.
pub fn format_work_hours(
    punch_in: Option<TimeOfDay>,
    punch_out: Option<TimeOfDay>,
    locale: Locale,
) -> String {
    calculate_work_minutes(punch_in, punch_out)
        .map_or_else(|| NO_PUNCH.to_string(), |m| format_duration(m, locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Option<TimeOfDay> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_work_minutes_normal_day() {
        assert_eq!(calculate_work_minutes(t("08:30"), t("17:45")), Some(555));
    }

    #[test]
    fn test_work_minutes_inverted_punches() {
        assert_eq!(calculate_work_minutes(t("18:00"), t("09:00")), None);
        assert_eq!(calculate_work_minutes(t("09:00"), t("09:00")), None);
    }

    #[test]
    fn test_work_minutes_missing_punch() {
        assert_eq!(calculate_work_minutes(None, t("18:00")), None);
        assert_eq!(calculate_work_minutes(None, None), None);
    }

    #[test]
    fn test_format_work_hours() {
        assert_eq!(
            format_work_hours(t("09:00"), t("18:15"), Locale::ZhTw),
            "9小時15分鐘"
        );
        assert_eq!(
            format_work_hours(t("09:00"), t("17:00"), Locale::EnUs),
            "8 hours"
        );
        assert_eq!(format_work_hours(t("09:00"), None, Locale::EnUs), "--:--");
    }
}
