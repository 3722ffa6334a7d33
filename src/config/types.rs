//! Configuration types for the flexible working hours policy.
//!
//! These structures are deserialized from the YAML files in a configuration
//! directory. Every field has a default matching the company policy, so a
//! file only needs to list the values it overrides.

use serde::{Deserialize, Serialize};

use crate::models::{Locale, TimeOfDay};

/// The flexible working hours policy.
///
/// # Example
///
/// ```
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let rules = FlexTimeRules::default();
/// assert_eq!(rules.flex_start, TimeOfDay::hm(8, 30));
/// assert_eq!(rules.required_work_minutes, 555);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexTimeRules {
    /// Start of the flexible arrival window; arriving at or before it means
    /// leaving at `standard_clock_out`.
    pub flex_start: TimeOfDay,
    /// End of the flexible arrival window (inclusive).
    pub flex_end: TimeOfDay,
    /// Departure for employees arriving at or before `flex_start`.
    pub standard_clock_out: TimeOfDay,
    /// Departure for employees arriving after `flex_end`. Also the latest
    /// point an afternoon leave segment may extend to.
    pub late_clock_out: TimeOfDay,
    /// Required presence per day, including the lunch break.
    pub required_work_minutes: u32,
    /// Leave must be filed in multiples of this many minutes.
    pub leave_unit_minutes: u32,
    /// Rounding waste above this many minutes is flagged as wasteful.
    pub wasted_warning_minutes: u32,
}

impl Default for FlexTimeRules {
    fn default() -> Self {
        Self {
            flex_start: TimeOfDay::hm(8, 30),
            flex_end: TimeOfDay::hm(9, 30),
            standard_clock_out: TimeOfDay::hm(17, 45),
            late_clock_out: TimeOfDay::hm(18, 45),
            required_work_minutes: 9 * 60 + 15,
            leave_unit_minutes: 30,
            wasted_warning_minutes: 10,
        }
    }
}

/// Settings for how results are presented and which records are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Language used for durations and weekday labels.
    pub locale: Locale,
    /// How many days back abnormal records are reported.
    pub abnormal_search_days: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            abnormal_search_days: 45,
        }
    }
}
