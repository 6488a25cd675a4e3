//! Mimic Mock - Negotiation and Response Generation
//!
//! This crate answers a request for a documented operation with a mock
//! response.
//!
//! # Flow
//!
//! ```text
//! MockRequest + MockParameters
//!        │
//!        ├──► MediaTypeNegotiator       ──► Option<String>
//!        ├──► ResponseStatusNegotiator  ──► Option<StatusKey>
//!        │
//!        ▼
//! MockResponseGenerator
//!        │  no media type      ──► 406 "Unsupported media type"
//!        │  no usable status   ──► MockError::InvalidNegotiatedStatus
//!        ▼
//! DataGenerator ──► Responder ──► http::Response<Bytes>
//! ```
//!
//! Every collaborator is a trait object, so any of them can be replaced.
//!
//! # Example
//!
//! ```
//! use mimic_core::fixtures;
//! use mimic_mock::{MockRequest, MockResponseGenerator};
//!
//! let generator = MockResponseGenerator::default();
//! let request = MockRequest::new().with_accept("application/json");
//!
//! let response = generator
//!     .generate_response(&request, &fixtures::get_pet_parameters())
//!     .unwrap();
//!
//! assert_eq!(response.status(), http::StatusCode::OK);
//! assert_eq!(response.headers()["content-type"], "application/json");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accept;
pub mod data;
pub mod generator;
pub mod negotiation;
pub mod request;
pub mod responder;

pub use accept::{parse_accept, MediaRange};
pub use data::{DataGenerator, ExampleDataGenerator};
pub use generator::{MockResponseGenerator, UNSUPPORTED_MEDIA_TYPE};
pub use negotiation::{
    negotiate_content, AcceptHeaderNegotiator, MediaTypeNegotiator, PreferredStatusNegotiator,
    ResponseStatusNegotiator,
};
pub use request::{MockRequest, DEFAULT_STATUS_HEADER};
pub use responder::{HttpResponder, Responder};
