//! Structural detection of known third-party client handles
//!
//! Client objects typically hold live sockets and credentials, and their
//! internal structure is unknown to the caller and may itself be cyclic.
//! Instead of inspecting types, each known client is recognized by a fixed
//! structural signature - a set of field-presence checks over the object's
//! own keys - and collapsed to a minimal descriptor before generic
//! traversal can see inside. Signatures are evaluated in a fixed order and
//! the first match wins.

use crate::domain::value::LogValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Recognized AI-provider API domains and their display names
const AI_PROVIDER_DOMAINS: &[(&str, &str)] = &[
    ("openai.com", "OpenAI"),
    ("anthropic.com", "Anthropic"),
    ("mistral.ai", "Mistral"),
];

/// The broker product name reported in server properties
const BROKER_PRODUCT: &str = "RabbitMQ";

type Fields = BTreeMap<String, LogValue>;

/// Match an object against the known client signatures
///
/// Returns the replacement descriptor for the first matching signature, or
/// `None` when the object should be traversed generically.
pub(crate) fn detect(fields: &Fields) -> Option<Value> {
    detect_ai_client(fields)
        .or_else(|| detect_database_client(fields))
        .or_else(|| detect_payments_client(fields))
        .or_else(|| detect_broker_connection(fields))
}

/// AI SDK client: an `apiKey` plus a `baseURL` pointing at a known provider
fn detect_ai_client(fields: &Fields) -> Option<Value> {
    if !fields.contains_key("apiKey") {
        return None;
    }
    let base_url = match fields.get("baseURL") {
        Some(LogValue::String(url)) => url,
        _ => return None,
    };
    let provider = AI_PROVIDER_DOMAINS
        .iter()
        .find(|(domain, _)| base_url.contains(domain))
        .map(|(_, name)| *name)?;

    let mut descriptor = Map::new();
    descriptor.insert(
        "type".to_string(),
        Value::String(format!("{provider} Client")),
    );
    descriptor.insert("initialized".to_string(), Value::Bool(true));
    Some(Value::Object(descriptor))
}

/// ORM client: a `$client` field, or an internal field exposing `fullSchema`
fn detect_database_client(fields: &Fields) -> Option<Value> {
    let is_client = fields.contains_key("$client") || fields.values().any(exposes_full_schema);
    if !is_client {
        return None;
    }

    let mut descriptor = Map::new();
    descriptor.insert(
        "type".to_string(),
        Value::String("DatabaseClient".to_string()),
    );
    descriptor.insert("sanitized".to_string(), Value::Bool(true));
    Some(Value::Object(descriptor))
}

fn exposes_full_schema(value: &LogValue) -> bool {
    match value {
        LogValue::Object(fields) => fields
            .try_read()
            .map(|fields| fields.contains_key("fullSchema"))
            .unwrap_or(false),
        _ => false,
    }
}

/// Payments SDK client: `VERSION`, `_api`, and a resource accessor
fn detect_payments_client(fields: &Fields) -> Option<Value> {
    if !fields.contains_key("VERSION") || !fields.contains_key("_api") {
        return None;
    }
    if !["account", "charges", "customers"]
        .iter()
        .any(|resource| fields.contains_key(*resource))
    {
        return None;
    }

    let version = fields.get("VERSION").map(primitive_value).unwrap_or(Value::Null);

    let mut descriptor = Map::new();
    descriptor.insert(
        "type".to_string(),
        Value::String("Stripe Client".to_string()),
    );
    descriptor.insert("initialized".to_string(), Value::Bool(true));
    descriptor.insert("version".to_string(), version);
    Some(Value::Object(descriptor))
}

fn primitive_value(value: &LogValue) -> Value {
    match value {
        LogValue::Bool(b) => Value::Bool(*b),
        LogValue::Integer(i) => Value::Number((*i).into()),
        LogValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        LogValue::String(s) => Value::String(s.clone()),
        _ => Value::Null,
    }
}

/// Message-broker connection: `connection.serverProperties.product`
fn detect_broker_connection(fields: &Fields) -> Option<Value> {
    let connection = match fields.get("connection") {
        Some(LogValue::Object(connection)) => connection,
        _ => return None,
    };
    let connection = connection.try_read().ok()?;

    let properties = match connection.get("serverProperties") {
        Some(LogValue::Object(properties)) => properties,
        _ => return None,
    };
    let properties = properties.try_read().ok()?;

    match properties.get("product") {
        Some(LogValue::String(product)) if product.as_str() == BROKER_PRODUCT => {
            let mut descriptor = Map::new();
            descriptor.insert("type".to_string(), Value::String(BROKER_PRODUCT.to_string()));
            descriptor.insert("initialized".to_string(), Value::Bool(true));
            descriptor.insert("connected".to_string(), Value::Bool(true));
            Some(Value::Object(descriptor))
        }
        _ => None,
    }
}
