//! Sanitizer configuration

use crate::policy::RedactionPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Sanitizer configuration
///
/// Supplied once at [`Sanitizer::new`](super::Sanitizer::new) and treated
/// as immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Maximum recursive descents before a branch is cut
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Arrays longer than this are truncated
    #[serde(default = "default_array_truncation_threshold")]
    pub array_truncation_threshold: usize,

    /// How many leading and trailing elements a truncated array keeps
    #[serde(default = "default_array_keep_count")]
    pub array_keep_count: usize,

    /// The redaction key sets
    #[serde(default)]
    pub policy: RedactionPolicy,
}

fn default_max_depth() -> usize {
    3
}

fn default_array_truncation_threshold() -> usize {
    10
}

fn default_array_keep_count() -> usize {
    3
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            array_truncation_threshold: default_array_truncation_threshold(),
            array_keep_count: default_array_keep_count(),
            policy: RedactionPolicy::default(),
        }
    }
}

impl SanitizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.array_keep_count == 0 {
            anyhow::bail!("array_keep_count must be at least 1");
        }

        // A truncated array keeps 2 * keep elements; anything shorter than
        // that must never hit the truncation path.
        if self.array_truncation_threshold < self.array_keep_count * 2 {
            anyhow::bail!(
                "array_truncation_threshold ({}) must be at least twice array_keep_count ({})",
                self.array_truncation_threshold,
                self.array_keep_count
            );
        }

        self.policy.validate().context("Invalid redaction policy")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LOGVEIL_SANITIZER_MAX_DEPTH") {
            self.max_depth = val
                .parse()
                .context("Invalid LOGVEIL_SANITIZER_MAX_DEPTH value")?;
        }

        if let Ok(val) = std::env::var("LOGVEIL_SANITIZER_ARRAY_TRUNCATION_THRESHOLD") {
            self.array_truncation_threshold = val
                .parse()
                .context("Invalid LOGVEIL_SANITIZER_ARRAY_TRUNCATION_THRESHOLD value")?;
        }

        if let Ok(val) = std::env::var("LOGVEIL_SANITIZER_ARRAY_KEEP_COUNT") {
            self.array_keep_count = val
                .parse()
                .context("Invalid LOGVEIL_SANITIZER_ARRAY_KEEP_COUNT value")?;
        }

        Ok(())
    }
}
