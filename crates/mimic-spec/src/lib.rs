//! Mimic Spec - Specification Parsing
//!
//! This crate turns a loosely-typed OpenAPI-style document into the strict
//! response model of [`mimic_core`].
//!
//! # Overview
//!
//! - [`SpecificationAccessor`] loads a JSON or YAML document and serves
//!   sub-trees by [`SpecificationPointer`]
//! - [`SpecificationParser`] is the single-method strategy every parser
//!   implements; parsers compose instead of branching on type tags
//! - [`ReferenceResolvingParser`] follows `$ref` indirection before handing a
//!   sub-tree to a delegate parser
//! - [`ResponseCollectionParser`] validates and normalizes one operation's
//!   `responses` object
//! - [`EndpointParser`] walks `paths` and produces [`mimic_core::MockParameters`]
//!   for every operation
//!
//! Validation problems never abort a parse. They are collected in the
//! returned [`Parsed`] value next to whatever could be built.
//!
//! # Architecture
//!
//! ```text
//!   document ──► SpecificationAccessor
//!                       │
//!                       ▼
//!                EndpointParser ── #/paths/{path}/{method}
//!                       │
//!                       ▼
//!           ResponseCollectionParser ── validates status keys and entries
//!                       │
//!                       ▼ (via ReferenceResolvingParser)
//!                ResponseParser ── description + content
//!                       │
//!                       ▼ (via ReferenceResolvingParser)
//!                 SchemaParser
//! ```
//!
//! # Example
//!
//! ```
//! use mimic_spec::{
//!     ResponseCollectionParser, SpecificationAccessor, SpecificationParser, SpecificationPointer,
//! };
//!
//! let specification = SpecificationAccessor::from_json_str(r#"{
//!     "responses": {
//!         "200": {"content": {"application/json": {"schema": {"type": "object"}}}},
//!         "default": {"content": {}}
//!     }
//! }"#).unwrap();
//!
//! let pointer = SpecificationPointer::root().with_path_element("responses");
//! let parsed = ResponseCollectionParser::new()
//!     .parse_pointed_schema(&specification, &pointer)
//!     .unwrap();
//!
//! assert_eq!(parsed.value.len(), 2);
//! assert!(parsed.problems.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accessor;
pub mod collection;
pub mod endpoint;
pub mod error;
pub mod parser;
pub mod pointer;
pub mod reference;
pub mod response;
pub mod schema;

pub use accessor::SpecificationAccessor;
pub use collection::ResponseCollectionParser;
pub use endpoint::{parse_endpoints, EndpointParser};
pub use error::{ParseProblem, SpecError, SpecResult};
pub use parser::{Parsed, SpecificationParser};
pub use pointer::SpecificationPointer;
pub use reference::ReferenceResolvingParser;
pub use response::ResponseParser;
pub use schema::SchemaParser;
