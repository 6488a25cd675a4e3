//! Response definitions and their status-keyed collection.
//!
//! # Example
//!
//! ```
//! use mimic_core::{ResponseDefinition, ResponseDefinitionCollection, Schema, StatusKey};
//! use serde_json::json;
//!
//! let collection = ResponseDefinitionCollection::builder()
//!     .response(
//!         ResponseDefinition::for_status(StatusKey::Code(200))
//!             .with_content("application/json", Schema::new(json!({"type": "object"}))),
//!     )
//!     .response(ResponseDefinition::for_status(StatusKey::Default))
//!     .build();
//!
//! assert_eq!(collection.len(), 2);
//! assert!(collection.get(StatusKey::Default).is_some());
//! ```

use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::Schema;
use crate::status::StatusKey;

/// One documented response for one status key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDefinition {
    status: StatusKey,
    #[serde(with = "http_status")]
    http_status: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    content: IndexMap<String, Schema>,
}

impl ResponseDefinition {
    /// Creates an empty definition for the `default` slot rendering as `200 OK`.
    ///
    /// Parsers build definitions this way and assign the authoritative status
    /// afterwards with [`ResponseDefinition::assign_status`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusKey::Default,
            http_status: StatusCode::OK,
            description: None,
            content: IndexMap::new(),
        }
    }

    /// Creates an empty definition for the given status key.
    ///
    /// The default slot renders as `200 OK`.
    #[must_use]
    pub fn for_status(status: StatusKey) -> Self {
        let mut definition = Self::new();
        definition.assign_status(status, StatusCode::OK);
        definition
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a media type and its schema.
    #[must_use]
    pub fn with_content(mut self, media_type: impl Into<String>, schema: Schema) -> Self {
        self.content.insert(media_type.into(), schema);
        self
    }

    /// Assigns the status key this definition is stored under.
    ///
    /// A concrete code renders as itself; the default slot renders as
    /// `default_status`.
    pub fn assign_status(&mut self, status: StatusKey, default_status: StatusCode) {
        self.status = status;
        self.http_status = status.status_code().unwrap_or(default_status);
    }

    /// Returns the status key.
    #[must_use]
    pub fn status(&self) -> StatusKey {
        self.status
    }

    /// Returns the HTTP status this definition renders as.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the media-type to schema mapping, in specification order.
    #[must_use]
    pub fn content(&self) -> &IndexMap<String, Schema> {
        &self.content
    }

    /// Returns the documented media types, in specification order.
    pub fn media_types(&self) -> impl Iterator<Item = &str> {
        self.content.keys().map(String::as_str)
    }

    /// Returns `true` if at least one media type is documented.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Looks up the schema registered for a media type.
    ///
    /// An exact key match wins; otherwise parameters are ignored and the
    /// essence is compared case-insensitively.
    #[must_use]
    pub fn schema_for(&self, media_type: &str) -> Option<&Schema> {
        if let Some(schema) = self.content.get(media_type) {
            return Some(schema);
        }

        let wanted = essence(media_type);
        self.content
            .iter()
            .find(|(key, _)| essence(key).eq_ignore_ascii_case(wanted))
            .map(|(_, schema)| schema)
    }
}

impl Default for ResponseDefinition {
    fn default() -> Self {
        Self::new()
    }
}

fn essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or(media_type).trim()
}

/// The validated, status-keyed response definitions of one operation.
///
/// Keys are unique and keep specification order. The collection has no
/// mutation API; build it with [`ResponseDefinitionCollection::builder`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseDefinitionCollection {
    responses: IndexMap<StatusKey, ResponseDefinition>,
}

impl ResponseDefinitionCollection {
    /// Creates a new collection builder.
    #[must_use]
    pub fn builder() -> ResponseCollectionBuilder {
        ResponseCollectionBuilder::new()
    }

    /// Creates an empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the definition stored under a status key.
    #[must_use]
    pub fn get(&self, status: StatusKey) -> Option<&ResponseDefinition> {
        self.responses.get(&status)
    }

    /// Returns `true` if a definition exists for the status key.
    #[must_use]
    pub fn contains(&self, status: StatusKey) -> bool {
        self.responses.contains_key(&status)
    }

    /// Returns the `default` definition, if documented.
    #[must_use]
    pub fn default_response(&self) -> Option<&ResponseDefinition> {
        self.get(StatusKey::Default)
    }

    /// Returns the first concrete 2xx key in specification order.
    #[must_use]
    pub fn first_success(&self) -> Option<StatusKey> {
        self.responses.keys().copied().find(StatusKey::is_success)
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Returns `true` if no definitions exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Iterates over the status keys in specification order.
    pub fn keys(&self) -> impl Iterator<Item = StatusKey> + '_ {
        self.responses.keys().copied()
    }

    /// Iterates over the definitions in specification order.
    pub fn iter(&self) -> impl Iterator<Item = &ResponseDefinition> {
        self.responses.values()
    }

    /// Returns every documented media type across all definitions.
    ///
    /// Ordered by definition first and content key second, without duplicates.
    #[must_use]
    pub fn media_types(&self) -> Vec<&str> {
        let mut media_types: Vec<&str> = Vec::new();
        for media_type in self.responses.values().flat_map(ResponseDefinition::media_types) {
            if !media_types.contains(&media_type) {
                media_types.push(media_type);
            }
        }
        media_types
    }
}

impl FromIterator<ResponseDefinition> for ResponseDefinitionCollection {
    fn from_iter<I: IntoIterator<Item = ResponseDefinition>>(iter: I) -> Self {
        let mut builder = ResponseCollectionBuilder::new();
        for definition in iter {
            builder.insert(definition);
        }
        builder.build()
    }
}

/// Builder for [`ResponseDefinitionCollection`].
///
/// Every definition is keyed by its own status, so a stored definition's
/// status always equals its key.
#[derive(Debug, Default)]
pub struct ResponseCollectionBuilder {
    responses: IndexMap<StatusKey, ResponseDefinition>,
}

impl ResponseCollectionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, returning the one it replaced.
    ///
    /// A replaced definition keeps its slot's original position.
    pub fn insert(&mut self, definition: ResponseDefinition) -> Option<ResponseDefinition> {
        self.responses.insert(definition.status(), definition)
    }

    /// Adds a definition (chaining form of [`insert`](Self::insert)).
    #[must_use]
    pub fn response(mut self, definition: ResponseDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Builds the collection.
    #[must_use]
    pub fn build(self) -> ResponseDefinitionCollection {
        ResponseDefinitionCollection {
            responses: self.responses,
        }
    }
}

mod http_status {
    use http::StatusCode;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(de::Error::custom)
    }
}
