//! Error types for the flexible working hours engine.
//!
//! Only boundary operations (configuration loading, parsing punch data) return
//! these errors. The calculation functions themselves are total and report
//! problems inside their result records.

use thiserror::Error;

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use flextime_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     input: "25:00".to_string(),
///     message: "hour must be below 24".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '25:00': hour must be below 24");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The loaded rules are internally inconsistent.
    #[error("Invalid rule '{field}': {message}")]
    InvalidRules {
        /// The offending rule field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A time-of-day string could not be parsed.
    #[error("Invalid time '{input}': {message}")]
    InvalidTime {
        /// The raw input.
        input: String,
        /// A description of the parse failure.
        message: String,
    },

    /// An attendance record date could not be parsed.
    #[error("Invalid date '{input}': {message}")]
    InvalidDate {
        /// The raw input.
        input: String,
        /// A description of the parse failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rules.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rules.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rules_displays_field_and_message() {
        let error = EngineError::InvalidRules {
            field: "leave_unit_minutes".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rule 'leave_unit_minutes': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_date_displays_input() {
        let error = EngineError::InvalidDate {
            input: "2025-13".to_string(),
            message: "expected YYYY/MM/DD".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date '2025-13': expected YYYY/MM/DD"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_time() -> EngineResult<()> {
            Err(EngineError::InvalidTime {
                input: "ab:cd".to_string(),
                message: "not a number".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_time()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
