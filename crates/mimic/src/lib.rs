//! # Mimic
//!
//! **Specification-driven HTTP mock responses**
//!
//! Mimic reads an OpenAPI document and answers requests to its operations
//! with mock responses:
//!
//! - **Response parsing** – Status-keyed response collections with every
//!   problem reported instead of aborting
//! - **Content negotiation** – `Accept` header matching with quality values
//!   and wildcards, `406 Not Acceptable` when nothing fits
//! - **Status selection** – Pick a documented response through a request
//!   header, fall back to `default`
//! - **Example data** – Payloads built from schema examples, defaults and types
//!
//! ## Quick Start
//!
//! ```no_run
//! use mimic::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new()
//!         .with_optional_file("mimic.toml")?
//!         .with_env_prefix("MIMIC")
//!         .load()?;
//!     mimic::init_logging(&config)?;
//!
//!     let service = MockService::from_config(&config)?;
//!
//!     let request = http::Request::get("/pets/1")
//!         .header("accept", "application/json")
//!         .body(())?;
//!     let response = service.respond(&request);
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! openapi.yaml ──► mimic-spec ──► Vec<MockParameters> ──► EndpointRouter
//!                                                              │
//! Request ──► EndpointRouter ──► MockRequest ──► MockResponseGenerator ──► Response
//! ```

#![doc(html_root_url = "https://docs.rs/mimic/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod router;
mod service;

// Re-export core types
pub use mimic_core as core;

// Re-export specification parsing
pub use mimic_spec as spec;

// Re-export negotiation and generation
pub use mimic_mock as mock;

// Re-export configuration
pub use mimic_config as config;

// Re-export telemetry
pub use mimic_telemetry as telemetry;

pub use error::ServiceError;
pub use mimic_config::MimicConfig;
pub use mimic_spec::SpecificationAccessor;
pub use router::{EndpointRouter, RouteMatch};
pub use service::MockService;

/// Initializes logging from the `[logging]` section of a configuration.
pub fn init_logging(config: &MimicConfig) -> mimic_telemetry::TelemetryResult<()> {
    mimic_telemetry::init_logging(&config.logging.to_log_config())
}

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use mimic::prelude::*;
///
/// let request = MockRequest::new().with_accept("application/json");
/// assert_eq!(request.accepted_ranges().len(), 1);
/// ```
pub mod prelude {
    pub use mimic_core::{
        MockError, MockParameters, MockResult, ResponseDefinition, ResponseDefinitionCollection,
        Schema, StatusKey,
    };

    pub use mimic_spec::{
        parse_endpoints, ParseProblem, Parsed, ResponseCollectionParser, SpecError,
        SpecificationAccessor, SpecificationParser, SpecificationPointer,
    };

    pub use mimic_mock::{
        AcceptHeaderNegotiator, DataGenerator, ExampleDataGenerator, MediaTypeNegotiator,
        MockRequest, MockResponseGenerator, PreferredStatusNegotiator, Responder,
        ResponseStatusNegotiator,
    };

    pub use mimic_config::{ConfigError, ConfigLoader, MimicConfig};

    pub use crate::{EndpointRouter, MockService, ServiceError};
}
