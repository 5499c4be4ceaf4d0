//! Submission configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use hubcast_types::{Endpoint, PolicyError, RetryPolicy};

/// Configuration for a submission run.
///
/// Can be loaded from a TOML file via [`SubmitConfig::from_toml_file`] or
/// built programmatically; CLI flags and env vars override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Primary hub endpoint URL. Required before any delivery attempt.
    #[serde(default)]
    pub primary_url: Option<String>,

    /// Secondary (fallback) hub endpoint URL.
    #[serde(default)]
    pub secondary_url: Option<String>,

    /// Attempt cycles before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt cycle, in milliseconds.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay after each failed cycle.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u32,

    /// Optional upper bound on a single delay, in milliseconds.
    #[serde(default)]
    pub max_delay_ms: Option<u64>,

    /// Log level filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Fatal configuration fault — reported before any delivery attempt.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no primary hub endpoint configured")]
    MissingPrimaryUrl,

    #[error("invalid retry policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    #[error("failed to read config file {path}: {detail}")]
    Io { path: String, detail: String },

    #[error("failed to parse config file {path}: {detail}")]
    Parse { path: String, detail: String },
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    5_000
}

fn default_backoff_multiplier() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SubmitConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            detail: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            detail: e.to_string(),
        })
    }

    /// Resolve the ordered endpoint list. The primary URL is required;
    /// the secondary is appended when present.
    pub fn endpoints(&self) -> Result<Vec<Endpoint>, ConfigError> {
        let primary = self
            .primary_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingPrimaryUrl)?;

        let mut endpoints = vec![Endpoint::primary(primary)];
        if let Some(secondary) = self.secondary_url.as_deref().filter(|url| !url.is_empty()) {
            endpoints.push(Endpoint::secondary(secondary));
        }
        Ok(endpoints)
    }

    /// Build and validate the retry policy.
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        let policy = RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            backoff_multiplier: self.backoff_multiplier,
            max_delay: self.max_delay_ms.map(Duration::from_millis),
        };
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            primary_url: None,
            secondary_url: None,
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_delay_ms: None,
            log_level: default_log_level(),
        }
    }
}
