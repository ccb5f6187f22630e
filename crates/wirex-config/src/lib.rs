// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for wirex services.
//!
//! [`AppConfig`] is the explicit settings struct handed by reference to the
//! bootstrap layer. It is loaded from TOML, overlaid with `WIREX_*`
//! environment variables, and checked by [`validate_config`], which separates
//! hard errors from advisory [`ConfigWarning`]s.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A recommended optional section is missing.
    MissingOptionalField {
        /// Name of the missing field.
        field: String,
        /// Why it matters.
        hint: String,
    },
    /// The remote-read timeout is unusually large.
    LargeTimeout {
        /// Timeout value in seconds.
        secs: u64,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingOptionalField { field, hint } => {
                write!(f, "missing optional field '{field}': {hint}")
            }
            ConfigWarning::LargeTimeout { secs } => {
                write!(f, "remote read has a large timeout ({secs}s)")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level settings for a process hosting the codec.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AppConfig {
    /// Service name attached to every log line.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Log filter directive in `EnvFilter` syntax (e.g. `"info"`,
    /// `"warn,wirex_status=debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Upstream remote-read endpoint, if this process queries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_read: Option<RemoteReadConfig>,
}

fn default_service_name() -> String {
    "wirex".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            log_format: LogFormat::Text,
            remote_read: None,
        }
    }
}

/// Connection settings for the remote-read upstream.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct RemoteReadConfig {
    /// Base URL; `/api/v1/read` is appended by the client.
    pub address: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// TCP keep-alive in seconds.
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
    /// Idle connections kept in the pool.
    #[serde(default = "default_max_idle_conns")]
    pub max_idle_conns: usize,
    /// Upper bound on open connections.
    #[serde(default = "default_max_conns")]
    pub max_conns: usize,
    /// Sent as the user agent.
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_keep_alive_secs() -> u64 {
    30
}

fn default_max_idle_conns() -> usize {
    10
}

fn default_max_conns() -> usize {
    100
}

fn default_client_name() -> String {
    "wirex".into()
}

impl RemoteReadConfig {
    /// Settings for `address` with every other field defaulted.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout_secs: default_timeout_secs(),
            keep_alive_secs: default_keep_alive_secs(),
            max_idle_conns: default_max_idle_conns(),
            max_conns: default_max_conns(),
            client_name: default_client_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Threshold above which a timeout generates a warning (one hour).
const LARGE_TIMEOUT_THRESHOLD: u64 = 3_600;


// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load an [`AppConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`AppConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into an [`AppConfig`].
pub fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `WIREX_SERVICE_NAME`
/// - `WIREX_LOG_LEVEL`
/// - `WIREX_LOG_FORMAT` (`text` or `json`; other values are ignored)
/// - `WIREX_REMOTE_READ_ADDRESS`
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(val) = std::env::var("WIREX_SERVICE_NAME") {
        config.service_name = val;
    }
    if let Ok(val) = std::env::var("WIREX_LOG_LEVEL") {
        config.log_level = val;
    }
    if let Ok(val) = std::env::var("WIREX_LOG_FORMAT") {
        match val.to_ascii_lowercase().as_str() {
            "text" => config.log_format = LogFormat::Text,
            "json" => config.log_format = LogFormat::Json,
            _ => {}
        }
    }
    if let Ok(val) = std::env::var("WIREX_REMOTE_READ_ADDRESS") {
        match config.remote_read.as_mut() {
            Some(rr) => rr.address = val,
            None => config.remote_read = Some(RemoteReadConfig::new(val)),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors are returned as a [`ConfigError::ValidationError`]; soft
/// issues come back as warnings.
pub fn validate_config(config: &AppConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if config.service_name.trim().is_empty() {
        errors.push("service_name must not be empty".into());
    }

    if let Err(e) = EnvFilter::try_new(&config.log_level) {
        errors.push(format!("invalid log_level '{}': {e}", config.log_level));
    }

    match &config.remote_read {
        Some(rr) => {
            if !(rr.address.starts_with("http://") || rr.address.starts_with("https://")) {
                errors.push(format!(
                    "remote_read: address '{}' must start with http:// or https://",
                    rr.address
                ));
            }
            if rr.timeout_secs == 0 {
                errors.push("remote_read: timeout_secs must be greater than zero".into());
            } else if rr.timeout_secs > LARGE_TIMEOUT_THRESHOLD {
                warnings.push(ConfigWarning::LargeTimeout {
                    secs: rr.timeout_secs,
                });
            }
            if rr.max_conns == 0 {
                errors.push("remote_read: max_conns must be greater than zero".into());
            }
            if rr.max_idle_conns > rr.max_conns {
                errors.push(format!(
                    "remote_read: max_idle_conns ({}) exceeds max_conns ({})",
                    rr.max_idle_conns, rr.max_conns
                ));
            }
        }
        None => warnings.push(ConfigWarning::MissingOptionalField {
            field: "remote_read".into(),
            hint: "remote-read queries are disabled".into(),
        }),
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Values in `overlay` take precedence over `base`
/// wherever the overlay differs from the defaults.
pub fn merge_configs(base: AppConfig, overlay: AppConfig) -> AppConfig {
    let defaults = AppConfig::default();
    AppConfig {
        service_name: if overlay.service_name != defaults.service_name {
            overlay.service_name
        } else {
            base.service_name
        },
        log_level: if overlay.log_level != defaults.log_level {
            overlay.log_level
        } else {
            base.log_level
        },
        log_format: if overlay.log_format != defaults.log_format {
            overlay.log_format
        } else {
            base.log_format
        },
        remote_read: overlay.remote_read.or(base.remote_read),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
