//! Content schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A content schema as written in the specification.
///
/// Mimic does not interpret JSON Schema semantics at parse time; the schema
/// is carried verbatim and handed to a data generator at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// Wraps a raw schema value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Creates the empty schema, which admits any value.
    #[must_use]
    pub fn any() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// Returns the raw schema value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the schema and returns the raw value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the declared `type`, if any.
    #[must_use]
    pub fn schema_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Returns the `$ref` target if this schema is an unresolved reference.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.0.get("$ref").and_then(Value::as_str)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::any()
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
