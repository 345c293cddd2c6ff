//! Domain models and types for Logveil.
//!
//! This module contains the core value model and error types the rest of the
//! crate is built on.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The input value model** ([`LogValue`], [`ErrorDetails`]) - an
//!   arbitrary runtime value as it is handed to a log call, including
//!   shared and self-referential container graphs
//! - **Error types** ([`LogveilError`])
//! - **Result type alias** ([`Result`])
//!
//! # Value Graphs
//!
//! Containers are reference-counted and shared, so inputs can form exactly
//! the adversarial shapes the sanitizer must survive:
//!
//! ```rust
//! use logveil::domain::value::LogValue;
//!
//! let request = LogValue::object();
//! request.insert("retry_of", request.clone()); // a cycle
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LogveilError>`](Result):
//!
//! ```rust
//! use logveil::domain::{LogveilError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = logveil::config::LogveilConfig::default();
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::LogveilError;
pub use result::Result;
pub use value::{ErrorDetails, LogValue};
