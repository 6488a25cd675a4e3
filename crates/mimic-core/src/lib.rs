//! # Mimic Core
//!
//! Core types for the Mimic mock server.
//!
//! This crate provides the in-memory model that the specification parsers
//! produce and the request-time negotiation reads:
//!
//! - [`StatusKey`] - A documented status code or the `default` response slot
//! - [`Schema`] - A content schema taken verbatim from the specification
//! - [`ResponseDefinition`] - One documented response and its media-type content map
//! - [`ResponseDefinitionCollection`] - The status-keyed, read-only set of responses for an operation
//! - [`MockParameters`] - Everything negotiation needs to know about one operation
//! - [`MockError`] - Standard error type for request-time failures

#![doc(html_root_url = "https://docs.rs/mimic-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod fixtures;
mod parameters;
mod response;
mod schema;
mod status;

pub use error::{ErrorCategory, ErrorDetail, ErrorEnvelope, MockError, MockResult};
pub use parameters::MockParameters;
pub use response::{
    ResponseCollectionBuilder, ResponseDefinition, ResponseDefinitionCollection,
};
pub use schema::Schema;
pub use status::{StatusKey, StatusKeyError, DEFAULT_STATUS_CODE};
