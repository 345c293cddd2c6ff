//! Interception wrapper guaranteeing log calls never panic
//!
//! [`SafeLogger`] implements the same severity-method surface an
//! application logs against, composed once around the underlying sink at
//! construction. Each call normalizes its arguments under `catch_unwind`;
//! if normalization fails in any way, the sink still receives a degraded
//! call carrying the severity name and the stringified failure, so the log
//! intent is never silently lost and no panic escapes into caller code.

use super::sink::{LogSink, Severity};
use crate::domain::value::LogValue;
use crate::sanitizer::{Sanitizer, SanitizerConfig};
use anyhow::Result;
use serde_json::{Map, Value};
use std::panic::{self, AssertUnwindSafe};

/// A panic-proof logger wrapping an underlying sink
///
/// # Examples
///
/// ```rust
/// use logveil::domain::value::LogValue;
/// use logveil::logging::{SafeLogger, TracingSink};
///
/// let logger = SafeLogger::with_defaults(TracingSink::new());
/// logger.warn(&[
///     LogValue::from("Token refresh failed"),
///     LogValue::object_from([("token", LogValue::from("tkn-1"))]),
/// ]);
/// ```
pub struct SafeLogger<S: LogSink> {
    sink: S,
    sanitizer: Sanitizer,
}

impl<S: LogSink> SafeLogger<S> {
    /// Create a safe logger around `sink`
    ///
    /// # Errors
    ///
    /// Returns an error if the sanitizer configuration is invalid.
    pub fn new(sink: S, config: SanitizerConfig) -> Result<Self> {
        Ok(Self {
            sink,
            sanitizer: Sanitizer::new(config)?,
        })
    }

    /// Create a safe logger with the default sanitizer configuration
    pub fn with_defaults(sink: S) -> Self {
        Self {
            sink,
            sanitizer: Sanitizer::with_defaults(),
        }
    }

    /// The sanitizer this logger normalizes with
    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Consume the logger, returning the underlying sink
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Log at trace severity
    pub fn trace(&self, args: &[LogValue]) {
        self.dispatch(Severity::Trace, args);
    }

    /// Log at debug severity
    pub fn debug(&self, args: &[LogValue]) {
        self.dispatch(Severity::Debug, args);
    }

    /// Log at info severity
    pub fn info(&self, args: &[LogValue]) {
        self.dispatch(Severity::Info, args);
    }

    /// Log at warn severity
    pub fn warn(&self, args: &[LogValue]) {
        self.dispatch(Severity::Warn, args);
    }

    /// Log at error severity
    pub fn error(&self, args: &[LogValue]) {
        self.dispatch(Severity::Error, args);
    }

    /// Log at fatal severity
    pub fn fatal(&self, args: &[LogValue]) {
        self.dispatch(Severity::Fatal, args);
    }

    fn dispatch(&self, severity: Severity, args: &[LogValue]) {
        let normalized =
            panic::catch_unwind(AssertUnwindSafe(|| self.sanitizer.normalize_args(args)));

        match normalized {
            Ok(normalized) => self.sink.write(severity, &normalized),
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!(
                    severity = %severity,
                    reason = %reason,
                    "Log argument sanitization failed"
                );
                self.sink.write(severity, &fallback_args(severity, &reason));
            }
        }
    }
}

/// The degraded argument sequence used when normalization fails
fn fallback_args(severity: Severity, reason: &str) -> Vec<Value> {
    let mut detail = Map::new();
    detail.insert(
        "sanitizationError".to_string(),
        Value::String(reason.to_string()),
    );

    vec![
        Value::String(format!(
            "{} logging failed",
            severity.as_str().to_uppercase()
        )),
        Value::Object(detail),
    ]
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown sanitization failure".to_string()
    }
}
