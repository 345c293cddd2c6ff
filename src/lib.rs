// Logveil - Cycle-Safe Structured Log Sanitizer
// Copyright (c) 2025 Logveil Contributors
// Licensed under the MIT License

//! # Logveil - Cycle-Safe Structured Log Sanitizer
//!
//! Logveil converts arbitrary runtime values (request objects, domain
//! entities, third-party client handles, errors) into bounded, redacted,
//! serializable JSON suitable for a logging sink - without ever panicking,
//! looping forever, or leaking secrets.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Sanitizing** self-referential and deeply nested value graphs into
//!   finite JSON trees
//! - **Redacting** credential-bearing fields by key name, process-wide
//! - **Collapsing** known third-party client handles into safe descriptors
//! - **Intercepting** severity-method calls so logging itself is failure-proof
//!
//! ## Architecture
//!
//! Logveil follows a layered architecture:
//!
//! - [`domain`] - Core value model and error types
//! - [`policy`] - The immutable redaction key sets and marker strings
//! - [`sanitizer`] - The cycle-safe traverser and argument normalizer
//! - [`logging`] - Sink abstraction, interception wrapper, and tracing setup
//! - [`config`] - Configuration management
//!
//! ## Quick Start
//!
//! ```rust
//! use logveil::domain::value::LogValue;
//! use logveil::logging::{SafeLogger, TracingSink};
//!
//! let logger = SafeLogger::with_defaults(TracingSink::new());
//!
//! let user = LogValue::object_from([
//!     ("id", LogValue::from(7)),
//!     ("password", LogValue::from("hunter2")),
//! ]);
//!
//! // The password never reaches the sink; the call cannot panic.
//! logger.info(&[LogValue::from("User logged in"), user]);
//! ```
//!
//! ## Error Handling
//!
//! Fallible construction paths return [`domain::LogveilError`]:
//!
//! ```rust
//! use logveil::domain::Result;
//! use logveil::config::LogveilConfig;
//!
//! fn example() -> Result<()> {
//!     let config = LogveilConfig::default();
//!     config.validate()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Logveil's own diagnostics use the `tracing` crate; see
//! [`logging::init_logging`] for subscriber setup.

pub mod config;
pub mod domain;
pub mod logging;
pub mod policy;
pub mod sanitizer;
