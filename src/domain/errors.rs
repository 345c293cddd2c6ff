//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Note that the sanitization hot path never returns these: traversal
//! failures degrade to in-band markers instead (see `sanitizer::engine`).

use thiserror::Error;

/// Main Logveil error type
///
/// This is the primary error type used throughout the crate for fallible
/// construction and configuration paths.
#[derive(Debug, Error)]
pub enum LogveilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Sanitization setup errors
    #[error("Sanitization error: {0}")]
    Sanitization(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for LogveilError {
    fn from(err: std::io::Error) -> Self {
        LogveilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LogveilError {
    fn from(err: serde_json::Error) -> Self {
        LogveilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LogveilError {
    fn from(err: toml::de::Error) -> Self {
        LogveilError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logveil_error_display() {
        let err = LogveilError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: LogveilError = io_err.into();
        assert!(matches!(err, LogveilError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LogveilError = json_err.into();
        assert!(matches!(err, LogveilError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: LogveilError = toml_err.into();
        assert!(matches!(err, LogveilError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_logveil_error_implements_std_error() {
        let err = LogveilError::Sanitization("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
