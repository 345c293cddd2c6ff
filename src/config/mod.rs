//! Configuration management for Logveil.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation. Every field has a default, so configuration is optional;
//! a file plus `LOGVEIL_*` environment overrides refine it.
//!
//! # Example
//!
//! ```no_run
//! use logveil::config::LogveilConfig;
//!
//! let config = LogveilConfig::from_file("logveil.toml").expect("Failed to load config");
//! println!("max depth: {}", config.sanitizer.max_depth);
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types for convenience
pub use loader::load_config;
pub use schema::{ApplicationConfig, LoggingConfig, LogveilConfig};
