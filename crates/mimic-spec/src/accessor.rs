//! Specification document access.
//!
//! [`SpecificationAccessor`] owns the raw document tree and serves sub-trees
//! by [`SpecificationPointer`]. Documents load from JSON or YAML, from a
//! string or a file.

use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::error::{SpecError, SpecResult};
use crate::pointer::SpecificationPointer;

/// Read access to a loaded specification document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationAccessor {
    document: Value,
}

impl SpecificationAccessor {
    /// Wraps an already parsed document.
    #[must_use]
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Loads a document from a JSON string.
    pub fn from_json_str(json: &str) -> SpecResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        debug!("loaded JSON specification");
        Ok(Self::new(document))
    }

    /// Loads a document from a YAML string.
    ///
    /// Non-string mapping keys, such as unquoted `200:` status codes, are
    /// converted to their string form.
    pub fn from_yaml_str(yaml: &str) -> SpecResult<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        debug!("loaded YAML specification");
        Ok(Self::new(yaml_to_json(document)))
    }

    /// Loads a document from a file, choosing the format by extension.
    ///
    /// `.json` is read as JSON; `.yaml` and `.yml` as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> SpecResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading specification from file");

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let content = fs::read_to_string(path).map_err(|e| SpecError::read_error(path, e))?;

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Err(SpecError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Returns the whole document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns the node at `pointer`.
    ///
    /// Fails with [`SpecError::PathNotFound`] when nothing exists there.
    pub fn get_schema(&self, pointer: &SpecificationPointer) -> SpecResult<&Value> {
        self.find(pointer)
            .ok_or_else(|| SpecError::path_not_found(pointer))
    }

    /// Returns the node at `pointer`, if any.
    #[must_use]
    pub fn find(&self, pointer: &SpecificationPointer) -> Option<&Value> {
        pointer
            .elements()
            .iter()
            .try_fold(&self.document, |node, element| match node {
                Value::Object(map) => map.get(element),
                Value::Array(items) => element.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
