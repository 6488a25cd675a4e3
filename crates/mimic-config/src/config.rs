//! Root configuration type.

use http::HeaderName;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, NegotiationConfig, SpecificationConfig};

/// Complete Mimic configuration.
///
/// # Example
///
/// ```
/// use mimic_config::MimicConfig;
///
/// let config = MimicConfig::default();
/// assert_eq!(config.negotiation.status_header, "x-mock-status");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MimicConfig {
    /// Specification source.
    #[serde(default)]
    pub specification: SpecificationConfig,

    /// Negotiation settings.
    #[serde(default)]
    pub negotiation: NegotiationConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MimicConfig {
    /// Validate the configuration.
    ///
    /// Checks that the status header is a valid header name, that the
    /// default response status is a real HTTP status, and that a log level
    /// is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if HeaderName::from_bytes(self.negotiation.status_header.as_bytes()).is_err() {
            return Err(ConfigError::invalid_value(
                "negotiation.status_header",
                format!("invalid header name: {}", self.negotiation.status_header),
            ));
        }

        if !(100..=599).contains(&self.negotiation.default_response_status) {
            return Err(ConfigError::invalid_value(
                "negotiation.default_response_status",
                "must be between 100 and 599",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.level",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                enabled: true,
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
            },
            ..Self::default()
        }
    }

    /// Production preset: JSON logs at `info`.
    #[must_use]
    pub fn production() -> Self {
        Self {
            logging: LoggingConfig {
                enabled: true,
                level: "info".to_string(),
                format: LogFormat::Json,
                include_location: false,
            },
            ..Self::default()
        }
    }
}
