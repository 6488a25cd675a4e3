//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a Mimic configuration could not be produced.
///
/// Settings are named by their dotted key, e.g. `negotiation.status_header`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("mimic configuration not found at {}", path.display())]
    MissingFile {
        /// Requested path.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("could not read mimic configuration at {}", path.display())]
    Unreadable {
        /// Path of the file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax error or unknown setting.
    #[error("malformed TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax error or unknown setting.
    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A setting holds a value Mimic cannot use.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// Dotted key of the setting.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `PREFIX__SECTION__KEY` variable, or the `.env` file, could not be applied.
    #[error("environment override {var} rejected: {reason}")]
    EnvOverride {
        /// Variable name, or `.env`.
        var: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Neither TOML nor JSON.
    #[error("{0}: configuration must be TOML or JSON")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// The requested file does not exist.
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// The file could not be read.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// The setting `key` holds an unusable value.
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The environment variable `var` could not be applied.
    pub fn env_override(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvOverride {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Dotted key of the offending setting, when the error concerns one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { key, .. } => Some(key),
            _ => None,
        }
    }
}
