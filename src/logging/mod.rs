//! Logging and observability
//!
//! This module provides the sink-facing half of Logveil:
//! - The [`LogSink`] trait - the opaque consumer of sanitized arguments
//! - [`SafeLogger`] - the interception wrapper that makes every severity
//!   call panic-proof
//! - [`TracingSink`] - the default sink, emitting `tracing` events
//! - [`init_logging`] - subscriber setup with optional file rotation
//!
//! # Example
//!
//! ```no_run
//! use logveil::domain::value::LogValue;
//! use logveil::logging::{init_logging, SafeLogger, TracingSink};
//! use logveil::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::default())
//!     .expect("Failed to initialize logging");
//!
//! let logger = SafeLogger::with_defaults(TracingSink::new());
//! logger.info(&[LogValue::from("Application started")]);
//! ```

pub mod safe;
pub mod sink;
pub mod structured;

// Re-export commonly used items
pub use safe::SafeLogger;
pub use sink::{LogSink, Severity, TracingSink};
pub use structured::{init_logging, LoggingGuard};
