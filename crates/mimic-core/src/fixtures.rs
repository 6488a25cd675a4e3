//! Test fixtures for Mimic development and testing.
//!
//! Pre-built response collections shared by the tests of the Mimic crates.
//!
//! # Example
//!
//! ```
//! use mimic_core::{fixtures, StatusKey};
//!
//! let responses = fixtures::pet_responses();
//! assert!(responses.contains(StatusKey::Code(200)));
//! assert!(responses.default_response().is_some());
//! ```

use http::Method;
use serde_json::json;

use crate::parameters::MockParameters;
use crate::response::{ResponseDefinition, ResponseDefinitionCollection};
use crate::schema::Schema;
use crate::status::StatusKey;

/// Schema of a pet.
#[must_use]
pub fn pet_schema() -> Schema {
    Schema::new(json!({
        "type": "object",
        "required": ["id", "name"],
        "properties": {
            "id": {"type": "integer", "format": "int64", "example": 10},
            "name": {"type": "string", "example": "doggie"},
            "status": {"type": "string", "enum": ["available", "pending", "sold"]}
        }
    }))
}

/// Schema of an error body.
#[must_use]
pub fn error_schema() -> Schema {
    Schema::new(json!({
        "type": "object",
        "properties": {
            "code": {"type": "integer", "example": 500},
            "message": {"type": "string", "example": "unexpected error"}
        }
    }))
}

/// Responses of a `getPetById`-style operation.
///
/// - `200` with `application/json` and `application/xml`
/// - `404` with `application/json`
/// - `default` with `application/json`
#[must_use]
pub fn pet_responses() -> ResponseDefinitionCollection {
    ResponseDefinitionCollection::builder()
        .response(
            ResponseDefinition::for_status(StatusKey::Code(200))
                .with_description("successful operation")
                .with_content("application/json", pet_schema())
                .with_content("application/xml", pet_schema()),
        )
        .response(
            ResponseDefinition::for_status(StatusKey::Code(404))
                .with_description("Pet not found")
                .with_content("application/json", error_schema()),
        )
        .response(
            ResponseDefinition::for_status(StatusKey::Default)
                .with_description("unexpected error")
                .with_content("application/json", error_schema()),
        )
        .build()
}

/// A single `200` response without any documented content.
#[must_use]
pub fn contentless_responses() -> ResponseDefinitionCollection {
    ResponseDefinitionCollection::builder()
        .response(ResponseDefinition::for_status(StatusKey::Code(200)).with_description("ok"))
        .build()
}

/// Mock parameters for `GET /pets/{petId}` using [`pet_responses`].
#[must_use]
pub fn get_pet_parameters() -> MockParameters {
    MockParameters::new(Method::GET, "/pets/{petId}", pet_responses()).with_operation_id("getPetById")
}
