//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ConfigError, LogFormat, MimicConfig};

/// Configuration loader.
///
/// Layers apply in call order, later ones overriding earlier ones:
/// 1. Default values
/// 2. A configuration file or string (TOML or JSON)
/// 3. Environment variables, applied at [`load`](Self::load)
///
/// A file replaces the whole configuration; sections it leaves out take
/// their defaults.
///
/// # Example
///
/// ```no_run
/// use mimic_config::ConfigLoader;
///
/// # fn main() -> Result<(), mimic_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("mimic.toml")?
///     .with_dotenv()?
///     .with_env_prefix("MIMIC")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: MimicConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MimicConfig::default(),
            env_prefix: None,
        }
    }

    /// Reset to default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = MimicConfig::default();
        self
    }

    /// Start from the development preset.
    ///
    /// ```
    /// use mimic_config::{ConfigLoader, LogFormat};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = MimicConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = MimicConfig::production();
        self
    }

    /// Load configuration from a `.toml` or `.json` file.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::missing_file(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, e))?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();

        self.config = parse(&content, &format).map_err(|e| match e {
            ConfigError::UnsupportedFormat(_) => {
                ConfigError::UnsupportedFormat(path.display().to_string())
            }
            other => other,
        })?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in `format` (`"toml"` or `"json"`).
    ///
    /// ```
    /// use mimic_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[negotiation]\nstatus_header = \"prefer-status\"", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.negotiation.status_header, "prefer-status");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Read environment overrides named `PREFIX__SECTION__KEY`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load variables from a `.env` file, if one exists.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::env_override(".env", e.to_string()));
            }
        }
        Ok(self)
    }

    /// Apply environment overrides and validate.
    pub fn load(mut self) -> Result<MimicConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Return the configuration without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> MimicConfig {
        self.config
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(key, _)| key.starts_with(&marker))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, &marker)?;
        }
        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, marker: &str) -> Result<(), ConfigError> {
        let parts: Vec<&str> = key
            .strip_prefix(marker)
            .unwrap_or_default()
            .split("__")
            .collect();

        match parts.as_slice() {
            ["SPECIFICATION", "PATH"] => {
                self.config.specification.path = PathBuf::from(value);
            }

            ["NEGOTIATION", "STATUS_HEADER"] => {
                self.config.negotiation.status_header = value.to_string();
            }
            ["NEGOTIATION", "FALLBACK_TO_FIRST_SUCCESS"] => {
                self.config.negotiation.fallback_to_first_success = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }
            ["NEGOTIATION", "DEFAULT_RESPONSE_STATUS"] => {
                self.config.negotiation.default_response_status = value
                    .parse()
                    .map_err(|_| ConfigError::env_override(key, "expected integer"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_override(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<MimicConfig, ConfigError> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        _ => Err(ConfigError::UnsupportedFormat(format.to_string())),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loader_defaults() {
        let config = ConfigLoader::new().with_defaults().load().unwrap();
        assert_eq!(config, MimicConfig::default());
    }

    #[test]
    fn test_loader_with_production() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"negotiation": {"fallback_to_first_success": true}}"#;
        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert!(config.negotiation.fallback_to_first_success);
        assert_eq!(config.logging, crate::LoggingConfig::default());
    }

    #[test]
    fn test_loader_with_string_unsupported() {
        let result = ConfigLoader::new().with_string("a: b", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_loader_with_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[specification]\npath = \"specs/petstore.json\"").unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.specification.path, PathBuf::from("specs/petstore.json"));
    }

    #[test]
    fn test_loader_with_file_unknown_field() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[negotiation]\nstrict = true").unwrap();

        assert!(matches!(
            ConfigLoader::new().with_file(file.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        assert!(matches!(
            ConfigLoader::new().with_file("/nonexistent/mimic.toml"),
            Err(ConfigError::MissingFile { .. })
        ));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/mimic.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, MimicConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("MIMICTEST_A__NEGOTIATION__STATUS_HEADER", "prefer-status");
        env::set_var("MIMICTEST_A__NEGOTIATION__DEFAULT_RESPONSE_STATUS", "500");
        env::set_var("MIMICTEST_A__LOGGING__FORMAT", "pretty");
        env::set_var("MIMICTEST_A__SPECIFICATION__PATH", "api.yaml");

        let config = ConfigLoader::new()
            .with_env_prefix("mimictest_a")
            .load()
            .unwrap();

        assert_eq!(config.negotiation.status_header, "prefer-status");
        assert_eq!(config.negotiation.default_response_status, 500);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.specification.path, PathBuf::from("api.yaml"));
    }

    #[test]
    fn test_env_override_parse_error() {
        env::set_var("MIMICTEST_B__LOGGING__ENABLED", "sometimes");

        let result = ConfigLoader::new().with_env_prefix("MIMICTEST_B").load();
        assert!(matches!(result, Err(ConfigError::EnvOverride { .. })));
    }

    #[test]
    fn test_env_override_is_validated() {
        env::set_var("MIMICTEST_C__NEGOTIATION__DEFAULT_RESPONSE_STATUS", "42");

        let result = ConfigLoader::new().with_env_prefix("MIMICTEST_C").load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_unvalidated() {
        let mut config = ConfigLoader::new().load_unvalidated();
        config.logging.level = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
