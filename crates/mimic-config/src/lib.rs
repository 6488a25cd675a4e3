//! Typed configuration for Mimic.
//!
//! Configuration is layered: built-in defaults, then a TOML or JSON file,
//! then environment variables. Unknown fields are rejected.
//!
//! - [`SpecificationConfig`] - where the API description lives
//! - [`NegotiationConfig`] - how the response status is chosen
//! - [`LoggingConfig`] - log level and output format
//!
//! # Example
//!
//! ```no_run
//! use mimic_config::ConfigLoader;
//!
//! # fn main() -> Result<(), mimic_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("mimic.toml")?
//!     .with_env_prefix("MIMIC")
//!     .load()?;
//!
//! println!("Mocking {}", config.specification.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [specification]
//! path = "openapi.yaml"
//!
//! [negotiation]
//! status_header = "x-mock-status"
//! fallback_to_first_success = false
//! default_response_status = 200
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MIMIC__SPECIFICATION__PATH` | `specification.path` |
//! | `MIMIC__NEGOTIATION__STATUS_HEADER` | `negotiation.status_header` |
//! | `MIMIC__NEGOTIATION__FALLBACK_TO_FIRST_SUCCESS` | `negotiation.fallback_to_first_success` |
//! | `MIMIC__NEGOTIATION__DEFAULT_RESPONSE_STATUS` | `negotiation.default_response_status` |
//! | `MIMIC__LOGGING__ENABLED` | `logging.enabled` |
//! | `MIMIC__LOGGING__LEVEL` | `logging.level` |
//! | `MIMIC__LOGGING__FORMAT` | `logging.format` |
//! | `MIMIC__LOGGING__INCLUDE_LOCATION` | `logging.include_location` |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::MimicConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, NegotiationConfig, SpecificationConfig};
