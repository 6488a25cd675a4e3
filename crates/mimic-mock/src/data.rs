//! Payload generation from schemas.

use std::sync::Arc;

use mimic_core::{MockResult, Schema};
use serde_json::{Map, Value};

/// Produces a payload conforming to a schema.
pub trait DataGenerator: Send + Sync {
    /// Generates a payload for `schema`.
    fn generate_data(&self, schema: &Schema) -> MockResult<Value>;
}

const DEFAULT_MAX_DEPTH: usize = 8;

/// Deterministic generator preferring documented examples.
///
/// For each schema node the first of these that exists is used:
///
/// 1. `example`
/// 2. the first entry of `examples`
/// 3. `default`
/// 4. `const`
/// 5. the first `enum` value
/// 6. a value built from `type` (and `format` for strings)
///
/// `allOf` branches are merged, `oneOf` and `anyOf` use their first branch.
/// Nested `$ref`s resolve against the document given to
/// [`with_document`](Self::with_document); without one, or past the depth
/// limit, they generate `null`.
///
/// # Example
///
/// ```
/// use mimic_core::Schema;
/// use mimic_mock::{DataGenerator, ExampleDataGenerator};
/// use serde_json::json;
///
/// let schema = Schema::new(json!({
///     "type": "object",
///     "properties": {
///         "id": {"type": "integer", "minimum": 1},
///         "name": {"type": "string", "example": "doggie"}
///     }
/// }));
///
/// let data = ExampleDataGenerator::new().generate_data(&schema).unwrap();
/// assert_eq!(data, json!({"id": 1, "name": "doggie"}));
/// ```
#[derive(Debug, Clone)]
pub struct ExampleDataGenerator {
    document: Option<Arc<Value>>,
    max_depth: usize,
}

impl ExampleDataGenerator {
    /// Creates a generator without a reference document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Resolves nested `#/...` references against `document`.
    #[must_use]
    pub fn with_document(mut self, document: Arc<Value>) -> Self {
        self.document = Some(document);
        self
    }

    /// Sets how deep nested schemas are followed.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn generate(&self, schema: &Value, depth: usize) -> Value {
        if depth > self.max_depth {
            return Value::Null;
        }
        let Value::Object(schema) = schema else {
            return Value::Null;
        };

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return self
                .resolve(reference)
                .map_or(Value::Null, |target| self.generate(target, depth + 1));
        }

        if let Some(example) = documented_value(schema) {
            return example.clone();
        }

        if let Some(Value::Array(branches)) = schema.get("allOf") {
            return self.merge_all_of(schema, branches, depth);
        }

        for key in ["oneOf", "anyOf"] {
            if let Some(first) = schema.get(key).and_then(Value::as_array).and_then(|b| b.first()) {
                return self.generate(first, depth + 1);
            }
        }

        match schema_type(schema) {
            Some("object") => self.generate_object(schema, depth),
            Some("array") => {
                let item = schema
                    .get("items")
                    .map_or(Value::Null, |items| self.generate(items, depth + 1));
                Value::Array(vec![item])
            }
            Some("string") => generate_string(schema),
            Some("integer") => generate_integer(schema),
            Some("number") => generate_number(schema),
            Some("boolean") => Value::Bool(true),
            None if schema.contains_key("properties") => self.generate_object(schema, depth),
            _ => Value::Null,
        }
    }

    fn generate_object(&self, schema: &Map<String, Value>, depth: usize) -> Value {
        let mut object = Map::new();
        if let Some(Value::Object(properties)) = schema.get("properties") {
            for (name, property) in properties {
                object.insert(name.clone(), self.generate(property, depth + 1));
            }
        }
        Value::Object(object)
    }

    fn merge_all_of(&self, schema: &Map<String, Value>, branches: &[Value], depth: usize) -> Value {
        let mut merged = Map::new();
        let mut last = Value::Null;

        let own = match self.generate_object(schema, depth) {
            Value::Object(own) if !own.is_empty() => Some(Value::Object(own)),
            _ => None,
        };

        for value in branches
            .iter()
            .map(|branch| self.generate(branch, depth + 1))
            .chain(own)
        {
            match value {
                Value::Object(object) => merged.extend(object),
                Value::Null => {}
                other => last = other,
            }
        }

        if merged.is_empty() && !last.is_null() {
            last
        } else {
            Value::Object(merged)
        }
    }

    fn resolve(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        self.document.as_deref()?.pointer(pointer)
    }
}

impl Default for ExampleDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGenerator for ExampleDataGenerator {
    fn generate_data(&self, schema: &Schema) -> MockResult<Value> {
        Ok(self.generate(schema.as_value(), 0))
    }
}

fn documented_value(schema: &Map<String, Value>) -> Option<&Value> {
    schema
        .get("example")
        .or_else(|| schema.get("examples").and_then(Value::as_array).and_then(|e| e.first()))
        .or_else(|| schema.get("default"))
        .or_else(|| schema.get("const"))
        .or_else(|| schema.get("enum").and_then(Value::as_array).and_then(|e| e.first()))
}

fn schema_type(schema: &Map<String, Value>) -> Option<&str> {
    match schema.get("type")? {
        Value::String(type_) => Some(type_.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|type_| *type_ != "null")
            .or(Some("null")),
        _ => None,
    }
}

fn generate_string(schema: &Map<String, Value>) -> Value {
    let format = schema.get("format").and_then(Value::as_str).unwrap_or_default();
    let mut value = match format {
        "date-time" => "2024-01-01T00:00:00Z",
        "date" => "2024-01-01",
        "time" => "00:00:00",
        "email" => "user@example.com",
        "uuid" => "00000000-0000-0000-0000-000000000000",
        "uri" | "url" => "https://example.com",
        "hostname" => "example.com",
        "ipv4" => "192.0.2.1",
        "ipv6" => "2001:db8::1",
        "byte" => "c3RyaW5n",
        _ => "string",
    }
    .to_string();

    let min_length = schema
        .get("minLength")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_default();
    while value.len() < min_length {
        value.push('x');
    }

    Value::String(value)
}

fn generate_integer(schema: &Map<String, Value>) -> Value {
    let minimum = schema.get("minimum").and_then(Value::as_i64);
    let maximum = schema.get("maximum").and_then(Value::as_i64);

    let value = match (minimum, maximum) {
        (Some(min), _) => min,
        (None, Some(max)) if max < 0 => max,
        _ => 0,
    };
    Value::from(value)
}

fn generate_number(schema: &Map<String, Value>) -> Value {
    let minimum = schema.get("minimum").and_then(Value::as_f64);
    let maximum = schema.get("maximum").and_then(Value::as_f64);

    let value = match (minimum, maximum) {
        (Some(min), _) => min,
        (None, Some(max)) if max < 0.0 => max,
        _ => 0.0,
    };
    Value::from(value)
}
