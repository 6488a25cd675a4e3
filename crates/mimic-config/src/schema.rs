//! Configuration section types.

use std::path::PathBuf;

use mimic_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

/// Where the API description is read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SpecificationConfig {
    /// Path to a JSON or YAML document.
    #[serde(default = "default_specification_path")]
    pub path: PathBuf,
}

impl Default for SpecificationConfig {
    fn default() -> Self {
        Self {
            path: default_specification_path(),
        }
    }
}

fn default_specification_path() -> PathBuf {
    PathBuf::from("openapi.yaml")
}

/// Response negotiation settings.
///
/// # Example
///
/// ```
/// use mimic_config::NegotiationConfig;
///
/// let config = NegotiationConfig::default();
/// assert_eq!(config.status_header, "x-mock-status");
/// assert!(!config.fallback_to_first_success);
/// assert_eq!(config.default_response_status, 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NegotiationConfig {
    /// Request header carrying the preferred status code.
    #[serde(default = "default_status_header")]
    pub status_header: String,

    /// Answer with the first documented 2xx response when no status was
    /// requested and no `default` response exists.
    #[serde(default)]
    pub fallback_to_first_success: bool,

    /// HTTP status the `default` response is served with.
    #[serde(default = "default_response_status")]
    pub default_response_status: u16,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            status_header: default_status_header(),
            fallback_to_first_success: false,
            default_response_status: default_response_status(),
        }
    }
}

fn default_status_header() -> String {
    "x-mock-status".to_string()
}

fn default_response_status() -> u16 {
    200
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines.
    #[default]
    Json,
    /// Human-readable pretty format.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the logging setup understood by `mimic-telemetry`.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            ..LogConfig::production()
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
