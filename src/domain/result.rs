//! Result type alias for Logveil

use super::errors::LogveilError;

/// Result type alias for Logveil operations
///
/// This is a convenience type alias that uses `LogveilError` as the error
/// type. Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use logveil::domain::result::Result;
/// use logveil::domain::errors::LogveilError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LogveilError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LogveilError>;
