//! Configuration loading and management for the engine.
//!
//! This module loads the flexible working hours policy and presentation
//! settings from YAML files. The built-in defaults are the company policy,
//! so loading from disk is only needed to override them.
//!
//! # Example
//!
//! ```no_run
//! use flextime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Flex window ends at {}", config.rules().flex_end);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, FlexTimeRules};
