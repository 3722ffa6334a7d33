//! Display locale for durations and weekday labels.

use serde::{Deserialize, Serialize};

/// Languages the presentation layer can request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Traditional Chinese, the attendance system's native language.
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    /// US English.
    #[serde(rename = "en-US")]
    EnUs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_traditional_chinese() {
        assert_eq!(Locale::default(), Locale::ZhTw);
    }

    #[test]
    fn test_serde_uses_language_tags() {
        assert_eq!(serde_json::to_string(&Locale::EnUs).unwrap(), "\"en-US\"");
        let locale: Locale = serde_json::from_str("\"zh-TW\"").unwrap();
        assert_eq!(locale, Locale::ZhTw);
    }
}
