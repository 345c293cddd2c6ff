//! Cycle-safe sanitization engine
//!
//! The traverser is total: it terminates and returns a finite tree for any
//! input graph, including self-referential ones, and it never panics.
//! Termination is structural - the depth bound and the array truncation
//! rule cap the number of recursive steps independent of input size - and
//! failure is isolated: a sub-value whose traversal fails is replaced by a
//! marker without aborting the enclosing object.
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
//! let request = LogValue::object();
//! request.insert("retry_of", request.clone());
//!
//! assert_eq!(
//!     sanitizer.sanitize(&request),
//!     json!({"retry_of": "[Circular Reference]"})
//! );
//! ```

use super::clients;
use super::config::SanitizerConfig;
use crate::domain::value::LogValue;
use crate::policy::{
    CIRCULAR_MARKER, DB_MARKER, HIDDEN_MARKER, INTERNAL_REF_MARKER, MAX_DEPTH_MARKER,
    REDACTED_MARKER, TOO_COMPLEX_MARKER,
};
use anyhow::{anyhow, Context, Result};
use chrono::SecondsFormat;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Counters for one top-level sanitization call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Keys masked because they matched the sensitive set
    pub redacted_keys: usize,
    /// Containers reported as already visited
    pub circular_refs: usize,
    /// Arrays shortened by the truncation rule
    pub truncated_arrays: usize,
    /// Branches cut by the depth bound
    pub depth_limited: usize,
    /// Sub-values replaced after a traversal failure
    pub isolated_failures: usize,
}

/// Per-call traversal state: the identity set and the counters
///
/// Created fresh for every top-level call and discarded when it returns;
/// nothing here outlives or is shared between calls.
struct Traversal {
    visited: HashSet<usize>,
    stats: SanitizeStats,
}

/// The cycle-safe sanitizer
///
/// # Thread Safety
///
/// The sanitizer holds only immutable configuration and allocates all
/// traversal state per call, so a single instance can be shared freely
/// across threads.
///
/// # Examples
///
/// ```rust
/// use logveil::sanitizer::{Sanitizer, SanitizerConfig};
///
/// let sanitizer = Sanitizer::new(SanitizerConfig::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sanitizer {
    config: SanitizerConfig,
}

impl Sanitizer {
    /// Create a new sanitizer
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid sanitizer configuration")?;
        Ok(Self { config })
    }

    /// Create a sanitizer with the default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: SanitizerConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Sanitize a value into a bounded, redacted JSON tree
    ///
    /// Total: terminates and returns for any input graph, never panics.
    pub fn sanitize(&self, value: &LogValue) -> Value {
        self.sanitize_with_stats(value).0
    }

    /// Sanitize a value, also returning traversal counters
    pub fn sanitize_with_stats(&self, value: &LogValue) -> (Value, SanitizeStats) {
        let mut traversal = Traversal {
            visited: HashSet::new(),
            stats: SanitizeStats::default(),
        };

        let sanitized = match self.sanitize_value(value, 0, &mut traversal) {
            Ok(sanitized) => sanitized,
            Err(_) => {
                traversal.stats.isolated_failures += 1;
                Value::String(TOO_COMPLEX_MARKER.to_string())
            }
        };

        (sanitized, traversal.stats)
    }

    /// Sanitize one node
    ///
    /// The `Err` case only reports failure to read this node itself (a
    /// contended or poisoned lock); callers replace the node with the
    /// complexity marker rather than propagating.
    fn sanitize_value(
        &self,
        value: &LogValue,
        depth: usize,
        traversal: &mut Traversal,
    ) -> Result<Value> {
        // Checked before everything else so it also bounds arrays and
        // identity checks.
        if depth > self.config.max_depth {
            traversal.stats.depth_limited += 1;
            return Ok(Value::String(MAX_DEPTH_MARKER.to_string()));
        }

        match value {
            LogValue::Null => Ok(Value::Null),
            LogValue::Bool(b) => Ok(Value::Bool(*b)),
            LogValue::Integer(i) => Ok(Value::Number((*i).into())),
            LogValue::Float(f) => Ok(serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null)),
            LogValue::String(s) => Ok(Value::String(s.clone())),
            LogValue::Timestamp(ts) => Ok(Value::String(
                ts.to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
            LogValue::Error(details) => {
                // Only name/message/stack survive; attached context would
                // let arbitrary request state ride along with errors.
                let mut fields = Map::new();
                fields.insert("name".to_string(), Value::String(details.name.clone()));
                fields.insert(
                    "message".to_string(),
                    Value::String(details.message.clone()),
                );
                fields.insert(
                    "stack".to_string(),
                    details
                        .stack
                        .clone()
                        .map(Value::String)
                        .unwrap_or(Value::Null),
                );
                Ok(Value::Object(fields))
            }
            LogValue::Array(items) => {
                let identity = Arc::as_ptr(items) as *const () as usize;
                if !traversal.visited.insert(identity) {
                    traversal.stats.circular_refs += 1;
                    return Ok(Value::String(CIRCULAR_MARKER.to_string()));
                }

                let items = items
                    .try_read()
                    .map_err(|_| anyhow!("array is locked or poisoned"))?;
                Ok(self.sanitize_array(&items, depth, traversal))
            }
            LogValue::Object(fields) => {
                let identity = Arc::as_ptr(fields) as *const () as usize;
                if !traversal.visited.insert(identity) {
                    traversal.stats.circular_refs += 1;
                    return Ok(Value::String(CIRCULAR_MARKER.to_string()));
                }

                let fields = fields
                    .try_read()
                    .map_err(|_| anyhow!("object is locked or poisoned"))?;

                // Known client handles hold live sockets and credentials;
                // collapse them before generic traversal can see inside.
                if let Some(descriptor) = clients::detect(&fields) {
                    return Ok(descriptor);
                }

                Ok(self.sanitize_object(&fields, depth, traversal))
            }
        }
    }

    /// Sanitize one element or field value, isolating failures
    fn sanitize_element(
        &self,
        value: &LogValue,
        depth: usize,
        traversal: &mut Traversal,
    ) -> Value {
        match self.sanitize_value(value, depth, traversal) {
            Ok(sanitized) => sanitized,
            Err(_) => {
                traversal.stats.isolated_failures += 1;
                Value::String(TOO_COMPLEX_MARKER.to_string())
            }
        }
    }

    fn sanitize_array(
        &self,
        items: &[LogValue],
        depth: usize,
        traversal: &mut Traversal,
    ) -> Value {
        let keep = self.config.array_keep_count;
        let mut sanitized = Vec::new();

        if items.len() > self.config.array_truncation_threshold {
            traversal.stats.truncated_arrays += 1;
            let omitted = items.len() - keep * 2;

            for item in &items[..keep] {
                sanitized.push(self.sanitize_element(item, depth + 1, traversal));
            }
            sanitized.push(Value::String(format!("[...{omitted} more items...]")));
            for item in &items[items.len() - keep..] {
                sanitized.push(self.sanitize_element(item, depth + 1, traversal));
            }
        } else {
            for item in items {
                sanitized.push(self.sanitize_element(item, depth + 1, traversal));
            }
        }

        Value::Array(sanitized)
    }

    fn sanitize_object(
        &self,
        fields: &BTreeMap<String, LogValue>,
        depth: usize,
        traversal: &mut Traversal,
    ) -> Value {
        let policy = &self.config.policy;
        let mut sanitized = Map::new();

        for (key, value) in fields {
            let replacement = if policy.is_sensitive(key) {
                traversal.stats.redacted_keys += 1;
                Value::String(REDACTED_MARKER.to_string())
            } else if policy.is_simplified_service(key) && value.is_object_like() {
                let mut descriptor = Map::new();
                descriptor.insert("type".to_string(), Value::String(title_case(key)));
                descriptor.insert("initialized".to_string(), Value::Bool(true));
                Value::Object(descriptor)
            } else if policy.is_hidden(key) {
                Value::String(HIDDEN_MARKER.to_string())
            } else if policy.is_db(key) {
                Value::String(DB_MARKER.to_string())
            } else if policy.is_internal_ref(key) {
                Value::String(INTERNAL_REF_MARKER.to_string())
            } else {
                self.sanitize_element(value, depth + 1, traversal)
            };

            sanitized.insert(key.clone(), replacement);
        }

        Value::Object(sanitized)
    }
}

/// Uppercase the first character, keep the rest as-is
fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
