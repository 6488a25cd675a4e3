//! Service construction errors.

use mimic_config::ConfigError;
use mimic_spec::SpecError;
use thiserror::Error;

/// Errors raised while building a [`MockService`](crate::MockService).
///
/// Request-time failures use [`MockError`](mimic_core::MockError) instead.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The API description could not be loaded or parsed.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
