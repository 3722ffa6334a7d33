//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the working
//! hours policy from a directory of YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::MINUTES_PER_DAY;

use super::types::{EngineSettings, FlexTimeRules};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rules.yaml     # Flexible working hours policy
/// └── settings.yaml  # Locale and reporting window
/// ```
///
/// # Example
///
/// ```no_run
/// use flextime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Required minutes: {}", loader.rules().required_work_minutes);
/// # Ok::<(), flextime_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    rules: FlexTimeRules,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML, or
    /// the rules fail validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<FlexTimeRules>(&path.join("rules.yaml"))?;
        let settings = Self::load_yaml::<EngineSettings>(&path.join("settings.yaml"))?;

        let loader = Self::from_parts(rules, settings)?;
        info!(
            path = %path.display(),
            flex_start = %loader.rules.flex_start,
            flex_end = %loader.rules.flex_end,
            required_work_minutes = loader.rules.required_work_minutes,
            "Loaded flexible working hours configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from already constructed parts, validating the rules.
    pub fn from_parts(rules: FlexTimeRules, settings: EngineSettings) -> EngineResult<Self> {
        validate_rules(&rules)?;
        Ok(Self { rules, settings })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the working hours policy.
    pub fn rules(&self) -> &FlexTimeRules {
        &self.rules
    }

    /// Returns the presentation settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

fn validate_rules(rules: &FlexTimeRules) -> EngineResult<()> {
    let invalid = |field: &str, message: &str| EngineError::InvalidRules {
        field: field.to_string(),
        message: message.to_string(),
    };

    if rules.flex_start > rules.flex_end {
        return Err(invalid("flex_start", "must not be later than flex_end"));
    }
    if rules.standard_clock_out > rules.late_clock_out {
        return Err(invalid(
            "standard_clock_out",
            "must not be later than late_clock_out",
        ));
    }
    if rules.required_work_minutes == 0 {
        return Err(invalid("required_work_minutes", "must be greater than zero"));
    }
    if rules.required_work_minutes > MINUTES_PER_DAY as u32 {
        return Err(invalid(
            "required_work_minutes",
            "must not exceed one day (1440 minutes)",
        ));
    }
    if rules.leave_unit_minutes == 0 {
        return Err(invalid("leave_unit_minutes", "must be greater than zero"));
    }
    if rules.leave_unit_minutes > MINUTES_PER_DAY as u32 {
        return Err(invalid(
            "leave_unit_minutes",
            "must not exceed one day (1440 minutes)",
        ));
    }
    Ok(())
}
