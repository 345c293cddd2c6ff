//! Redaction policy
//!
//! The process-wide, immutable key-name sets that drive masking decisions,
//! plus the fixed marker strings sanitized output is built from. The policy
//! is supplied once at construction (defaults below, or deserialized from
//! configuration) and is read-only afterwards; there is no per-call
//! override surface.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Replacement for values under a sensitive key
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// Replacement for values under a hidden key
pub const HIDDEN_MARKER: &str = "[Hidden for brevity]";

/// Replacement for values under a database key
pub const DB_MARKER: &str = "[DB Object - Details Hidden]";

/// Replacement for values under an internal-reference key
pub const INTERNAL_REF_MARKER: &str = "[Internal Reference - Hidden]";

/// Replacement for a container already visited in the same call
pub const CIRCULAR_MARKER: &str = "[Circular Reference]";

/// Replacement for a branch past the depth bound
pub const MAX_DEPTH_MARKER: &str = "[Max Depth Exceeded]";

/// Replacement for a sub-value whose traversal failed
pub const TOO_COMPLEX_MARKER: &str = "[Too Complex To Serialize]";

/// The five disjoint-purpose key sets
///
/// Each set collapses matching keys to a different shape:
///
/// - `sensitive_keys` always mask to [`REDACTED_MARKER`], regardless of the
///   value's type or nesting
/// - `simplified_service_keys` collapse object values to a
///   `{type, initialized}` descriptor
/// - `hidden_keys` collapse to [`HIDDEN_MARKER`]
/// - `db_keys` collapse to [`DB_MARKER`]
/// - `internal_ref_keys` collapse to [`INTERNAL_REF_MARKER`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionPolicy {
    /// Keys whose values are always masked
    #[serde(default = "default_sensitive_keys")]
    pub sensitive_keys: BTreeSet<String>,

    /// Keys naming known integrated services
    #[serde(default = "default_simplified_service_keys")]
    pub simplified_service_keys: BTreeSet<String>,

    /// Keys collapsed to the fixed hidden marker
    #[serde(default = "default_hidden_keys")]
    pub hidden_keys: BTreeSet<String>,

    /// Keys holding database handles
    #[serde(default = "default_db_keys")]
    pub db_keys: BTreeSet<String>,

    /// Keys holding provider-internal handles
    #[serde(default = "default_internal_ref_keys")]
    pub internal_ref_keys: BTreeSet<String>,
}

fn key_set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|key| (*key).to_string()).collect()
}

fn default_sensitive_keys() -> BTreeSet<String> {
    key_set(&[
        "apiKey",
        "api_key",
        "key",
        "secret",
        "token",
        "password",
        "credentials",
        "auth",
        "jwt",
        "openaiApiKey",
        "stripeSecretKey",
    ])
}

fn default_simplified_service_keys() -> BTreeSet<String> {
    key_set(&["openai", "stripe", "prisma", "redis", "rabbitmq"])
}

fn default_hidden_keys() -> BTreeSet<String> {
    key_set(&["fullSchema", "$client"])
}

fn default_db_keys() -> BTreeSet<String> {
    key_set(&["database", "db", "_events"])
}

fn default_internal_ref_keys() -> BTreeSet<String> {
    key_set(&["_api", "_httpClient"])
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self {
            sensitive_keys: default_sensitive_keys(),
            simplified_service_keys: default_simplified_service_keys(),
            hidden_keys: default_hidden_keys(),
            db_keys: default_db_keys(),
            internal_ref_keys: default_internal_ref_keys(),
        }
    }
}

impl RedactionPolicy {
    /// Whether `key` must always be masked
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.sensitive_keys.contains(key)
    }

    /// Whether `key` names a known integrated service
    pub fn is_simplified_service(&self, key: &str) -> bool {
        self.simplified_service_keys.contains(key)
    }

    /// Whether `key` is collapsed to the hidden marker
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_keys.contains(key)
    }

    /// Whether `key` holds a database handle
    pub fn is_db(&self, key: &str) -> bool {
        self.db_keys.contains(key)
    }

    /// Whether `key` holds a provider-internal handle
    pub fn is_internal_ref(&self, key: &str) -> bool {
        self.internal_ref_keys.contains(key)
    }

    /// Validate the policy
    ///
    /// The five sets serve disjoint purposes; a key appearing in two of
    /// them would make masking order-dependent, so overlap is rejected.
    pub fn validate(&self) -> Result<()> {
        let sets: [(&str, &BTreeSet<String>); 5] = [
            ("sensitive_keys", &self.sensitive_keys),
            ("simplified_service_keys", &self.simplified_service_keys),
            ("hidden_keys", &self.hidden_keys),
            ("db_keys", &self.db_keys),
            ("internal_ref_keys", &self.internal_ref_keys),
        ];

        for (i, (first_name, first)) in sets.iter().enumerate() {
            for (second_name, second) in sets.iter().skip(i + 1) {
                if let Some(key) = first.intersection(second).next() {
                    bail!(
                        "redaction key {key:?} appears in both {first_name} and {second_name}"
                    );
                }
            }
        }

        Ok(())
    }
}
