//! Clock-in classification and a readable rendering of the policy.

use serde::{Deserialize, Serialize};

use crate::config::FlexTimeRules;
use crate::models::{Locale, TimeOfDay};

use super::time_utils::format_duration;

/// How an arrival relates to the flexible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockInKind {
    /// At or before the start of the window.
    Early,
    /// Inside the window.
    Flexible,
    /// After the window.
    Late,
    /// No arrival punch.
    None,
}

/// Classification of an arrival punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInAnalysis {
    /// The classification.
    #[serde(rename = "type")]
    pub kind: ClockInKind,
    /// Short description.
    pub description: String,
    /// Arrived at or before the flexible window.
    pub is_early: bool,
    /// Arrived after the flexible window.
    pub is_late: bool,
    /// Arrived inside the flexible window.
    pub is_flexible: bool,
}

/// Classifies an arrival using the same inclusive boundaries as the
/// expected clock-out prediction.
///
/// ```
/// use flextime_engine::calculation::{analyze_clock_in, ClockInKind};
/// use flextime_engine::config::FlexTimeRules;
/// use flextime_engine::models::TimeOfDay;
///
/// let analysis = analyze_clock_in(Some(TimeOfDay::hm(9, 30)), &FlexTimeRules::default());
/// assert_eq!(analysis.kind, ClockInKind::Flexible);
/// ```
pub fn analyze_clock_in(clock_in: Option<TimeOfDay>, rules: &FlexTimeRules) -> ClockInAnalysis {
    let (kind, description) = match clock_in {
        None => (ClockInKind::None, "Not clocked in yet"),
        Some(t) if t <= rules.flex_start => (ClockInKind::Early, "Early arrival"),
        Some(t) if t <= rules.flex_end => (ClockInKind::Flexible, "Flexible arrival"),
        Some(_) => (ClockInKind::Late, "Late arrival"),
    };

    ClockInAnalysis {
        kind,
        description: description.to_string(),
        is_early: kind == ClockInKind::Early,
        is_late: kind == ClockInKind::Late,
        is_flexible: kind == ClockInKind::Flexible,
    }
}

/// One row of the policy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexRuleLine {
    /// When the row applies.
    pub condition: String,
    /// What the employee gets.
    pub result: String,
    /// Plain-language explanation.
    pub description: String,
}

/// The policy rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexTimeRulesDescription {
    /// Heading.
    pub title: String,
    /// One row per arrival branch.
    pub rules: Vec<FlexRuleLine>,
    /// Additional notes.
    pub notes: Vec<String>,
}

/// Renders the configured policy as a table for the presentation layer.
pub fn describe_rules(rules: &FlexTimeRules, locale: Locale) -> FlexTimeRulesDescription {
    let required = format_duration(rules.required_work_minutes, locale);

    let line = |condition: String, result: String, description: &str| FlexRuleLine {
        condition,
        result,
        description: description.to_string(),
    };

    match locale {
        Locale::ZhTw => FlexTimeRulesDescription {
            title: "彈性上班制度規則".to_string(),
            rules: vec![
                line(
                    format!("{} 或之前上班", rules.flex_start),
                    format!("{} 下班", rules.standard_clock_out),
                    "早到可以早下班",
                ),
                line(
                    format!("{} - {} 之間上班", rules.flex_start, rules.flex_end),
                    format!("固定工作 {}", required),
                    "彈性上班時間",
                ),
                line(
                    format!("{} 之後上班", rules.flex_end),
                    format!("{} 下班", rules.late_clock_out),
                    "遲到固定下班時間",
                ),
            ],
            notes: vec![
                format!("彈性上班時間：{} - {}", rules.flex_start, rules.flex_end),
                format!("標準工作時間：{}", required),
                "午休時間不計入工作時間".to_string(),
            ],
        },
        Locale::EnUs => FlexTimeRulesDescription {
            title: "Flex Time Rules".to_string(),
            rules: vec![
                line(
                    format!("Clock in at or before {}", rules.flex_start),
                    format!("Clock out at {}", rules.standard_clock_out),
                    "Arrive early, leave early",
                ),
                line(
                    format!("Clock in {} - {}", rules.flex_start, rules.flex_end),
                    format!("Work exactly {}", required),
                    "Flexible arrival window",
                ),
                line(
                    format!("Clock in after {}", rules.flex_end),
                    format!("Clock out at {}", rules.late_clock_out),
                    "Late arrival, fixed departure",
                ),
            ],
            notes: vec![
                format!("Flex time window: {} - {}", rules.flex_start, rules.flex_end),
                format!("Required work hours: {}", required),
                "Lunch break not included in work hours".to_string(),
            ],
        },
    }
}
