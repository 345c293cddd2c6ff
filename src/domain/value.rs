//! The input value model for log calls
//!
//! [`LogValue`] models an arbitrary runtime value as it is handed to a log
//! call: primitives, timestamps, captured errors, and container graphs.
//! Containers are reference-counted ([`Arc`]) and interior-mutable
//! ([`RwLock`]), so a value graph can legitimately contain shared subtrees
//! and cycles - the shapes the sanitizer is required to survive. The `Arc`
//! allocation address doubles as the container's identity for cycle
//! detection.
//!
//! # Examples
//!
//! ```rust
//! use logveil::domain::value::LogValue;
//!
//! let session = LogValue::object_from([
//!     ("id", LogValue::from("sess-1")),
//!     ("attempts", LogValue::array_from([LogValue::from(1), LogValue::from(2)])),
//! ]);
//! session.insert("parent", session.clone()); // cycles are fine
//! ```

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// A shared, interior-mutable array of log values
pub type SharedArray = Arc<RwLock<Vec<LogValue>>>;

/// A shared, interior-mutable string-keyed map of log values
pub type SharedObject = Arc<RwLock<BTreeMap<String, LogValue>>>;

/// Any value passed to a log call
///
/// Cloning a container variant clones the handle, not the contents: both
/// clones refer to the same allocation and compare identical for cycle
/// detection purposes.
#[derive(Debug, Clone, Default)]
pub enum LogValue {
    /// The absent value
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Integer(i64),
    /// A floating-point number
    Float(f64),
    /// A string
    String(String),
    /// A point in time, rendered as ISO-8601 by the sanitizer
    Timestamp(DateTime<Utc>),
    /// A captured error (name, message, stack, attached context)
    Error(ErrorDetails),
    /// A shared array
    Array(SharedArray),
    /// A shared string-keyed object
    Object(SharedObject),
}

impl LogValue {
    /// Create an empty shared object
    pub fn object() -> Self {
        LogValue::Object(Arc::new(RwLock::new(BTreeMap::new())))
    }

    /// Create a shared object from key/value entries
    pub fn object_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, LogValue)>,
    {
        let fields: BTreeMap<String, LogValue> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        LogValue::Object(Arc::new(RwLock::new(fields)))
    }

    /// Create an empty shared array
    pub fn array() -> Self {
        LogValue::Array(Arc::new(RwLock::new(Vec::new())))
    }

    /// Create a shared array from elements
    pub fn array_from<I>(items: I) -> Self
    where
        I: IntoIterator<Item = LogValue>,
    {
        LogValue::Array(Arc::new(RwLock::new(items.into_iter().collect())))
    }

    /// Insert a field into an object value
    ///
    /// Returns `true` if the value was stored. Returns `false` when `self`
    /// is not an object or its lock is poisoned.
    pub fn insert(&self, key: impl Into<String>, value: LogValue) -> bool {
        match self {
            LogValue::Object(fields) => match fields.write() {
                Ok(mut fields) => {
                    fields.insert(key.into(), value);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Append an element to an array value
    ///
    /// Returns `true` if the value was stored. Returns `false` when `self`
    /// is not an array or its lock is poisoned.
    pub fn push(&self, value: LogValue) -> bool {
        match self {
            LogValue::Array(items) => match items.write() {
                Ok(mut items) => {
                    items.push(value);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Whether this value would be a non-null `object` in the source system
    ///
    /// Arrays, timestamps and errors all count: they are traversed by the
    /// sanitizer rather than passed through as primitives.
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            LogValue::Object(_) | LogValue::Array(_) | LogValue::Timestamp(_) | LogValue::Error(_)
        )
    }

    /// The identity of a container value, if it has one
    ///
    /// Two clones of the same container share an identity; structurally
    /// equal but separately allocated containers do not.
    pub fn identity(&self) -> Option<usize> {
        match self {
            LogValue::Array(items) => Some(Arc::as_ptr(items) as *const () as usize),
            LogValue::Object(fields) => Some(Arc::as_ptr(fields) as *const () as usize),
            _ => None,
        }
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        LogValue::Bool(value)
    }
}

impl From<i32> for LogValue {
    fn from(value: i32) -> Self {
        LogValue::Integer(i64::from(value))
    }
}

impl From<i64> for LogValue {
    fn from(value: i64) -> Self {
        LogValue::Integer(value)
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        LogValue::Float(value)
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        LogValue::String(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        LogValue::String(value)
    }
}

impl From<DateTime<Utc>> for LogValue {
    fn from(value: DateTime<Utc>) -> Self {
        LogValue::Timestamp(value)
    }
}

impl From<ErrorDetails> for LogValue {
    fn from(value: ErrorDetails) -> Self {
        LogValue::Error(value)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => LogValue::Null,
            serde_json::Value::Bool(b) => LogValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    LogValue::Integer(i)
                } else {
                    LogValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => LogValue::String(s),
            serde_json::Value::Array(items) => {
                LogValue::array_from(items.into_iter().map(LogValue::from))
            }
            serde_json::Value::Object(fields) => LogValue::object_from(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, LogValue::from(value))),
            ),
        }
    }
}

/// A captured error: what the sanitizer is allowed to log about a failure
///
/// Only `name`, `message` and `stack` survive sanitization; `context`
/// models arbitrary data attached to an error object and is deliberately
/// dropped so attached request state cannot leak through error logging.
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    /// The error's type name
    pub name: String,
    /// The rendered error message
    pub message: String,
    /// The cause chain, if any
    pub stack: Option<String>,
    /// Arbitrary attached context - never copied into sanitized output
    pub context: BTreeMap<String, LogValue>,
}

impl ErrorDetails {
    /// Create error details from a name and message
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            context: BTreeMap::new(),
        }
    }

    /// Sets the stack
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attaches a context field
    pub fn with_context(mut self, key: impl Into<String>, value: LogValue) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Capture a live error value
    ///
    /// The name is the error's type name (last path segment), the message
    /// its `Display` rendering, and the stack the `source()` chain joined
    /// with `caused by:` lines.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let name = std::any::type_name::<E>()
            .rsplit("::")
            .next()
            .unwrap_or("Error")
            .to_string();

        let mut frames = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            frames.push(cause.to_string());
            source = cause.source();
        }
        let stack = if frames.is_empty() {
            None
        } else {
            Some(frames.join("\ncaused by: "))
        };

        Self {
            name,
            message: error.to_string(),
            stack,
            context: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LogveilError;

    #[test]
    fn test_container_identity_is_shared_across_clones() {
        let object = LogValue::object();
        let clone = object.clone();
        assert_eq!(object.identity(), clone.identity());

        let other = LogValue::object();
        assert_ne!(object.identity(), other.identity());
    }

    #[test]
    fn test_primitives_have_no_identity() {
        assert_eq!(LogValue::from(7).identity(), None);
        assert_eq!(LogValue::from("text").identity(), None);
        assert_eq!(LogValue::Null.identity(), None);
    }

    #[test]
    fn test_insert_and_push() {
        let object = LogValue::object();
        assert!(object.insert("id", LogValue::from(7)));
        assert!(!object.push(LogValue::from(7)));

        let array = LogValue::array();
        assert!(array.push(LogValue::from(1)));
        assert!(!array.insert("id", LogValue::from(1)));
    }

    #[test]
    fn test_cyclic_graph_construction() {
        let object = LogValue::object();
        assert!(object.insert("self", object.clone()));

        if let LogValue::Object(fields) = &object {
            let fields = fields.read().unwrap();
            assert_eq!(fields.len(), 1);
            assert_eq!(fields.get("self").unwrap().identity(), object.identity());
        } else {
            panic!("expected object");
        }
    }

    #[test]
    fn test_is_object_like() {
        assert!(LogValue::object().is_object_like());
        assert!(LogValue::array().is_object_like());
        assert!(LogValue::Timestamp(Utc::now()).is_object_like());
        assert!(LogValue::Error(ErrorDetails::new("E", "boom")).is_object_like());

        assert!(!LogValue::Null.is_object_like());
        assert!(!LogValue::from("text").is_object_like());
        assert!(!LogValue::from(1.5).is_object_like());
    }

    #[test]
    fn test_from_json_value() {
        let json = serde_json::json!({
            "id": 7,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "inner": {"ok": true},
            "missing": null
        });

        let value = LogValue::from(json);
        let LogValue::Object(fields) = &value else {
            panic!("expected object");
        };
        let fields = fields.read().unwrap();
        assert!(matches!(fields.get("id"), Some(LogValue::Integer(7))));
        assert!(matches!(fields.get("ratio"), Some(LogValue::Float(_))));
        assert!(matches!(fields.get("tags"), Some(LogValue::Array(_))));
        assert!(matches!(fields.get("inner"), Some(LogValue::Object(_))));
        assert!(matches!(fields.get("missing"), Some(LogValue::Null)));
    }

    #[test]
    fn test_error_details_from_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LogveilError = io_err.into();
        let details = ErrorDetails::from_error(&err);

        assert_eq!(details.name, "LogveilError");
        assert!(details.message.contains("file missing"));
        assert!(details.stack.is_none());
    }

    #[test]
    fn test_error_details_builder() {
        let details = ErrorDetails::new("TimeoutError", "upstream timed out")
            .with_stack("at fetch\nat retry")
            .with_context("request_id", LogValue::from("req-1"));

        assert_eq!(details.name, "TimeoutError");
        assert_eq!(details.stack.as_deref(), Some("at fetch\nat retry"));
        assert_eq!(details.context.len(), 1);
    }
}
