//! Per-operation mock parameters.

use http::Method;

use crate::response::ResponseDefinitionCollection;

/// Everything request-time negotiation knows about one operation.
///
/// Built once when the specification is parsed and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MockParameters {
    /// HTTP method of the operation.
    pub method: Method,
    /// Path template (e.g., "/pets/{petId}").
    pub path: String,
    /// Operation ID, if the specification declares one.
    pub operation_id: Option<String>,
    /// Documented responses.
    pub responses: ResponseDefinitionCollection,
}

impl MockParameters {
    /// Creates parameters for an operation.
    #[must_use]
    pub fn new(
        method: Method,
        path: impl Into<String>,
        responses: ResponseDefinitionCollection,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            operation_id: None,
            responses,
        }
    }

    /// Creates parameters holding only a response collection.
    ///
    /// Useful when negotiating outside of any routed operation.
    #[must_use]
    pub fn from_responses(responses: ResponseDefinitionCollection) -> Self {
        Self::new(Method::GET, "/", responses)
    }

    /// Sets the operation ID.
    #[must_use]
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Returns a human-readable label for logs.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.operation_id {
            Some(id) => id.clone(),
            None => format!("{} {}", self.method, self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_operation_id() {
        let params = MockParameters::new(Method::GET, "/pets", ResponseDefinitionCollection::empty())
            .with_operation_id("listPets");
        assert_eq!(params.label(), "listPets");
    }

    #[test]
    fn test_label_falls_back_to_route() {
        let params =
            MockParameters::new(Method::DELETE, "/pets/{petId}", ResponseDefinitionCollection::empty());
        assert_eq!(params.label(), "DELETE /pets/{petId}");
    }
}
