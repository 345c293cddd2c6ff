//! Integration tests for the interception wrapper and sinks

use logveil::config::LoggingConfig;
use logveil::domain::value::{ErrorDetails, LogValue};
use logveil::logging::{init_logging, LogSink, SafeLogger, Severity, TracingSink};
use logveil::policy::RedactionPolicy;
use logveil::sanitizer::SanitizerConfig;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Sink recording every write for assertions
#[derive(Clone)]
struct RecordingSink {
    writes: Arc<Mutex<Vec<(Severity, Vec<Value>)>>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn writes(&self) -> Vec<(Severity, Vec<Value>)> {
        self.writes.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, severity: Severity, args: &[Value]) {
        self.writes.lock().unwrap().push((severity, args.to_vec()));
    }
}

#[test]
fn test_severity_methods_reach_the_sink_in_order() {
    let sink = RecordingSink::new();
    let logger = SafeLogger::with_defaults(sink.clone());

    logger.trace(&[LogValue::from("a")]);
    logger.debug(&[LogValue::from("b")]);
    logger.info(&[LogValue::from("c")]);
    logger.warn(&[LogValue::from("d")]);
    logger.error(&[LogValue::from("e")]);
    logger.fatal(&[LogValue::from("f")]);

    let severities: Vec<Severity> = sink.writes().iter().map(|(s, _)| *s).collect();
    assert_eq!(severities, Severity::ALL.to_vec());
}

#[test]
fn test_credentials_never_reach_the_sink() {
    let sink = RecordingSink::new();
    let logger = SafeLogger::with_defaults(sink.clone());

    logger.info(&[
        LogValue::from("Payment processed"),
        LogValue::object_from([
            ("amount", LogValue::from(1250)),
            ("stripeSecretKey", LogValue::from("sk_live_abc")),
            (
                "customer",
                LogValue::object_from([("token", LogValue::from("tok_1"))]),
            ),
        ]),
    ]);

    let writes = sink.writes();
    assert_eq!(
        writes[0].1,
        vec![
            json!("Payment processed"),
            json!({
                "amount": 1250,
                "stripeSecretKey": "[REDACTED]",
                "customer": {"token": "[REDACTED]"}
            })
        ]
    );

    let rendered = serde_json::to_string(&writes[0].1).unwrap();
    assert!(!rendered.contains("sk_live_abc"));
    assert!(!rendered.contains("tok_1"));
}

#[test]
fn test_adversarial_arguments_never_panic() {
    let sink = RecordingSink::new();
    let logger = SafeLogger::with_defaults(sink.clone());

    let cyclic = LogValue::object();
    cyclic.insert("self", cyclic.clone());

    let error_value = LogValue::Error(
        ErrorDetails::new("E", "boom").with_context("secret", LogValue::from("s")),
    );

    logger.error(&[
        LogValue::from("everything at once"),
        cyclic,
        LogValue::array_from((0..1000).map(LogValue::from)),
        error_value,
        LogValue::Null,
        LogValue::from(f64::NAN),
    ]);

    let writes = sink.writes();
    assert_eq!(writes.len(), 1);
    let args = &writes[0].1;
    assert_eq!(args[0], json!("everything at once"));
    assert_eq!(args[1], json!({"self": "[Circular Reference]"}));
    assert_eq!(args[2].as_array().unwrap().len(), 7);
    assert_eq!(
        args[3],
        json!({"name": "E", "message": "boom", "stack": null})
    );
    assert_eq!(args[4], json!(null));
    assert_eq!(args[5], json!(null));
}

#[test]
fn test_custom_policy_flows_through_the_wrapper() {
    let mut policy = RedactionPolicy::default();
    policy.sensitive_keys.insert("ssn".to_string());

    let config = SanitizerConfig {
        policy,
        ..SanitizerConfig::default()
    };

    let sink = RecordingSink::new();
    let logger = SafeLogger::new(sink.clone(), config).unwrap();

    logger.warn(&[LogValue::object_from([("ssn", LogValue::from("123-45-6789"))])]);

    assert_eq!(sink.writes()[0].1, vec![json!({"ssn": "[REDACTED]"})]);
}

#[test]
fn test_concurrent_logging_through_one_logger() {
    let sink = RecordingSink::new();
    let logger = Arc::new(SafeLogger::with_defaults(sink.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                logger.info(&[
                    LogValue::from("worker event"),
                    LogValue::object_from([("worker", LogValue::from(i as i64))]),
                ]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.writes().len(), 8);
}

#[test]
fn test_tracing_sink_end_to_end() {
    let log_dir = tempfile::TempDir::new().unwrap();
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_dir.path().to_string_lossy().to_string(),
        local_rotation: "daily".to_string(),
    };

    let guard = init_logging("trace", &config).unwrap();

    let logger = SafeLogger::with_defaults(TracingSink::new());
    logger.info(&[
        LogValue::from("User logged in"),
        LogValue::object_from([("password", LogValue::from("p"))]),
    ]);
    logger.fatal(&[LogValue::from("going down")]);

    // Dropping the guard flushes the non-blocking file writer.
    drop(guard);

    let mut contents = String::new();
    for entry in std::fs::read_dir(log_dir.path()).unwrap() {
        contents.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
    }
    assert!(contents.contains("User logged in"));
    assert!(contents.contains("[REDACTED]"));
    assert!(!contents.contains("\"p\""));
}
