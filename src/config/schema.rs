//! Configuration schema
//!
//! TOML-deserializable configuration with per-field defaults, so an empty
//! file (or no file at all) yields a fully working setup.

use crate::domain::{LogveilError, Result};
use crate::logging::sink::Severity;
use crate::sanitizer::SanitizerConfig;
use serde::{Deserialize, Serialize};

/// Top-level Logveil configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogveilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Sanitizer settings
    #[serde(default)]
    pub sanitizer: SanitizerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LogveilConfig {
    /// Load configuration from a TOML file
    ///
    /// See [`loader::load_config`](crate::config::loader::load_config) for
    /// the substitution/override/validation pipeline.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        super::loader::load_config(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Severity::parse(&self.application.log_level)?;

        self.sanitizer.validate().map_err(|e| {
            LogveilError::Configuration(format!("Invalid sanitizer configuration: {e:#}"))
        })?;

        Ok(())
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name, used in diagnostics
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Minimum severity for Logveil's own diagnostics
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_app_name() -> String {
    "logveil".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}
