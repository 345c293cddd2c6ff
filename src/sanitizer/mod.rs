//! Value sanitization
//!
//! This module provides the core [`Sanitizer`]: a total, cycle-safe
//! conversion from arbitrary [`LogValue`](crate::domain::value::LogValue)
//! graphs into bounded, redacted `serde_json::Value` trees.
//!
//! # Architecture
//!
//! The sanitizer coordinates three concerns:
//! - **Traversal** (`engine`): depth-bounded, identity-tracked recursion
//!   with array truncation and per-key failure isolation
//! - **Client detection** (`clients`): structural signatures that collapse
//!   known third-party client handles into safe descriptors before their
//!   internals can be dumped
//! - **Normalization** (`normalize`): per log call, deciding which
//!   arguments are traversed and which pass through
//!
//! # Examples
//!
//! ```rust
//! use logveil::domain::value::LogValue;
//! use logveil::sanitizer::Sanitizer;
//! use serde_json::json;
//!
//! let sanitizer = Sanitizer::with_defaults();
//!
//! let request = LogValue::object_from([
//!     ("user", LogValue::from("ada")),
//!     ("token", LogValue::from("tkn-123")),
//! ]);
//!
//! assert_eq!(
//!     sanitizer.sanitize(&request),
//!     json!({"user": "ada", "token": "[REDACTED]"})
//! );
//! ```

mod clients;
pub mod config;
pub mod engine;
mod normalize;

// Re-export commonly used types for convenience
pub use config::SanitizerConfig;
pub use engine::{SanitizeStats, Sanitizer};
