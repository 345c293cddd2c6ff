//! Log sink abstraction and the tracing-backed default sink

use crate::domain::{LogveilError, Result};
use serde_json::Value;
use std::fmt;

/// A log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Finest-grained diagnostics
    Trace,
    /// Debug diagnostics
    Debug,
    /// Routine operational events
    Info,
    /// Unexpected but recoverable conditions
    Warn,
    /// Failures
    Error,
    /// Failures the process cannot recover from
    Fatal,
}

impl Severity {
    /// All six severities, lowest first
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// The lowercase severity name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Parse a severity from a string, case-insensitively
    pub fn parse(value: &str) -> Result<Severity> {
        match value.to_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(LogveilError::Configuration(format!(
                "Invalid severity: {}. Must be one of: trace, debug, info, warn, error, fatal",
                value
            ))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external consumer of sanitized log arguments
///
/// The sink receives the normalized argument sequence and performs actual
/// output/transport; its wire or file format is its own concern. Sinks
/// must be shareable across threads.
pub trait LogSink: Send + Sync {
    /// Write one log call's sanitized arguments
    fn write(&self, severity: Severity, args: &[Value]);
}

/// The default sink: emits each write as a `tracing` event
///
/// Fatal has no `tracing` counterpart and maps to an `error` event with a
/// `fatal` field set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, args: &[Value]) {
        let payload = Value::Array(args.to_vec());
        match severity {
            Severity::Trace => tracing::trace!(target: "logveil", args = %payload),
            Severity::Debug => tracing::debug!(target: "logveil", args = %payload),
            Severity::Info => tracing::info!(target: "logveil", args = %payload),
            Severity::Warn => tracing::warn!(target: "logveil", args = %payload),
            Severity::Error => tracing::error!(target: "logveil", args = %payload),
            Severity::Fatal => tracing::error!(target: "logveil", fatal = true, args = %payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Severity::Trace)]
    #[test_case("debug", Severity::Debug)]
    #[test_case("info", Severity::Info)]
    #[test_case("warn", Severity::Warn)]
    #[test_case("error", Severity::Error)]
    #[test_case("fatal", Severity::Fatal)]
    fn test_parse_severity_valid(input: &str, expected: Severity) {
        assert_eq!(Severity::parse(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_severity_case_insensitive() {
        assert_eq!(Severity::parse("TRACE").unwrap(), Severity::Trace);
        assert_eq!(Severity::parse("Info").unwrap(), Severity::Info);
        assert_eq!(Severity::parse("FATAL").unwrap(), Severity::Fatal);
    }

    #[test]
    fn test_parse_severity_invalid() {
        assert!(Severity::parse("invalid").is_err());
        assert!(Severity::parse("").is_err());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(Severity::Fatal.to_string(), "fatal");
    }

    #[test]
    fn test_tracing_sink_write_without_subscriber_is_noop() {
        // No subscriber installed: events are discarded, nothing panics.
        let sink = TracingSink::new();
        for severity in Severity::ALL {
            sink.write(severity, &[serde_json::json!({"ok": true})]);
        }
    }
}
