//! Wall-clock time of day.
//!
//! [`TimeOfDay`] stores minutes since midnight and is the only time type the
//! calculations work with. Strings are parsed once at the boundary with
//! [`parse_punch`], which turns the upstream `"--:--"` placeholder into `None`.

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Placeholder the attendance system uses for a punch that has not happened.
pub const NO_PUNCH: &str = "--:--";

/// A time of day with minute precision, in the range `00:00..=23:59`.
///
/// # Example
///
/// ```
/// use flextime_engine::models::TimeOfDay;
///
/// let clock_in: TimeOfDay = "8:45".parse().unwrap();
/// assert_eq!(clock_in.minutes(), 525);
/// assert_eq!(clock_in.to_string(), "08:45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from an hour and minute.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24` or `minute >= 60`. Intended for constants; use
    /// [`TimeOfDay::from_minutes`] or parsing for untrusted input.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self(hour * 60 + minute)
    }

    /// Builds a time from minutes since midnight, or `None` if out of range.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY as u32).then_some(Self(minutes as u16))
    }

    /// Builds a time from any minute count, wrapping across midnight.
    ///
    /// ```
    /// use flextime_engine::models::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_minutes_wrapping(1500).to_string(), "01:00");
    /// assert_eq!(TimeOfDay::from_minutes_wrapping(-30).to_string(), "23:30");
    /// ```
    pub fn from_minutes_wrapping(minutes: i32) -> Self {
        Self(minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Builds a time from an unsigned minute count, wrapping across midnight.
    pub fn from_day_minutes(minutes: u32) -> Self {
        Self((minutes % MINUTES_PER_DAY as u32) as u16)
    }

    /// Takes the hour and minute of a chrono time, ignoring seconds.
    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u32 {
        self.0 as u32
    }

    /// The hour component.
    pub const fn hour(self) -> u32 {
        self.0 as u32 / 60
    }

    /// The minute component.
    pub const fn minute(self) -> u32 {
        self.0 as u32 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidTime {
            input: s.to_string(),
            message: message.to_string(),
        };

        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected HH:MM"))?;

        let hour = parse_component(hour).ok_or_else(|| invalid("hour must be 1-2 digits"))?;
        let minute =
            parse_component(minute).ok_or_else(|| invalid("minute must be 1-2 digits"))?;

        if hour >= 24 {
            return Err(invalid("hour must be below 24"));
        }
        if minute >= 60 {
            return Err(invalid("minute must be below 60"));
        }

        Ok(Self(hour * 60 + minute))
    }
}

fn parse_component(part: &str) -> Option<u16> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a punch time as delivered by the attendance system.
///
/// Returns `Ok(None)` for an empty string or the `"--:--"` placeholder,
/// `Ok(Some(_))` for a valid time and `Err` for anything else, so callers can
/// tell "not punched yet" apart from bad data.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{parse_punch, TimeOfDay};
///
/// assert_eq!(parse_punch("--:--").unwrap(), None);
/// assert_eq!(parse_punch("09:15").unwrap(), Some(TimeOfDay::hm(9, 15)));
/// assert!(parse_punch("9h15").is_err());
/// ```
pub fn parse_punch(input: &str) -> EngineResult<Option<TimeOfDay>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == NO_PUNCH {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Renders an optional time, using `"--:--"` when absent.
pub fn display_or_sentinel(time: Option<TimeOfDay>) -> String {
    time.map_or_else(|| NO_PUNCH.to_string(), |t| t.to_string())
}
