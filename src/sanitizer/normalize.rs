//! Argument normalization for log calls
//!
//! A log call carries an ordered sequence of arguments. The normalizer
//! decides, per argument, whether it needs traversal (object-like values)
//! or passes through untouched (primitives, and the leading message
//! string). Each traversed argument gets its own fresh identity set, so
//! sharing a subtree between two arguments of one call does not change
//! either argument's output.

use super::engine::Sanitizer;
use crate::domain::value::LogValue;
use serde_json::Value;

impl Sanitizer {
    /// Normalize the arguments of one log call
    ///
    /// If the first element is a string and more elements follow, it is the
    /// log message and passes through untouched; every subsequent
    /// object-like element is sanitized at depth 0, everything else passes
    /// through as its JSON primitive.
    pub fn normalize_args(&self, args: &[LogValue]) -> Vec<Value> {
        if args.is_empty() {
            return Vec::new();
        }

        let mut normalized = Vec::with_capacity(args.len());
        let mut rest = args;

        if args.len() > 1 {
            if let LogValue::String(message) = &args[0] {
                normalized.push(Value::String(message.clone()));
                rest = &args[1..];
            }
        }

        for arg in rest {
            if arg.is_object_like() {
                normalized.push(self.sanitize(arg));
            } else {
                normalized.push(passthrough(arg));
            }
        }

        normalized
    }
}

/// Convert a non-object-like value to its JSON primitive
fn passthrough(value: &LogValue) -> Value {
    match value {
        LogValue::Null => Value::Null,
        LogValue::Bool(b) => Value::Bool(*b),
        LogValue::Integer(i) => Value::Number((*i).into()),
        LogValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        LogValue::String(s) => Value::String(s.clone()),
        // Object-like variants never reach here; normalize_args sanitizes
        // them instead.
        LogValue::Timestamp(_) | LogValue::Error(_) | LogValue::Array(_) | LogValue::Object(_) => {
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_args_unchanged() {
        let sanitizer = Sanitizer::with_defaults();
        assert!(sanitizer.normalize_args(&[]).is_empty());
    }

    #[test]
    fn test_leading_message_passes_through() {
        let sanitizer = Sanitizer::with_defaults();
        let args = [
            LogValue::from("User logged in"),
            LogValue::object_from([
                ("password", LogValue::from("p")),
                ("id", LogValue::from(7)),
            ]),
        ];

        assert_eq!(
            sanitizer.normalize_args(&args),
            vec![
                json!("User logged in"),
                json!({"password": "[REDACTED]", "id": 7})
            ]
        );
    }

    #[test]
    fn test_single_string_passes_through() {
        let sanitizer = Sanitizer::with_defaults();
        let args = [LogValue::from("plain message")];
        assert_eq!(sanitizer.normalize_args(&args), vec![json!("plain message")]);
    }

    #[test]
    fn test_non_string_first_argument_is_sanitized() {
        let sanitizer = Sanitizer::with_defaults();
        let args = [
            LogValue::object_from([("token", LogValue::from("t"))]),
            LogValue::from("trailing"),
        ];

        assert_eq!(
            sanitizer.normalize_args(&args),
            vec![json!({"token": "[REDACTED]"}), json!("trailing")]
        );
    }

    #[test]
    fn test_primitive_arguments_pass_through() {
        let sanitizer = Sanitizer::with_defaults();
        let args = [
            LogValue::from("count"),
            LogValue::from(3),
            LogValue::from(true),
            LogValue::Null,
        ];

        assert_eq!(
            sanitizer.normalize_args(&args),
            vec![json!("count"), json!(3), json!(true), json!(null)]
        );
    }

    #[test]
    fn test_later_string_arguments_pass_through() {
        let sanitizer = Sanitizer::with_defaults();
        let args = [
            LogValue::from("first"),
            LogValue::from("second"),
            LogValue::from("third"),
        ];

        assert_eq!(
            sanitizer.normalize_args(&args),
            vec![json!("first"), json!("second"), json!("third")]
        );
    }

    #[test]
    fn test_shared_subtree_across_arguments_sanitized_independently() {
        let sanitizer = Sanitizer::with_defaults();
        let shared = LogValue::object_from([("id", LogValue::from(7))]);
        let first = LogValue::object_from([("payload", shared.clone())]);
        let second = LogValue::object_from([("payload", shared)]);

        let normalized = sanitizer.normalize_args(&[first, second]);
        // Fresh identity set per argument: neither reports a cycle.
        assert_eq!(normalized[0], json!({"payload": {"id": 7}}));
        assert_eq!(normalized[1], json!({"payload": {"id": 7}}));
    }
}
