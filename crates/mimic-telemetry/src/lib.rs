//! Logging for Mimic.
//!
//! Mimic reports through `tracing` events. This crate installs the
//! subscriber that renders them, either as JSON lines or as pretty
//! human-readable output.
//!
//! | Event | Level | Fields |
//! |-------|-------|--------|
//! | specification loaded | `info` | `path` |
//! | response parsed | `debug` | `path` |
//! | specification problem | `warn` | `path`, `problem` |
//! | media type / status negotiated | `debug` | `operation`, ... |
//! | mock response generated | `debug` | `operation`, `status`, `media_type` |
//!
//! # Example
//!
//! ```rust,ignore
//! use mimic_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!("mock server ready");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
