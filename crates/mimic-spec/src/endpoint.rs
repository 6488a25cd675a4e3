//! Endpoint discovery.
//!
//! [`EndpointParser`] walks the `paths` object and builds one
//! [`MockParameters`] per documented operation.

use http::Method;
use mimic_core::{MockParameters, ResponseDefinitionCollection};
use serde_json::Value;
use tracing::debug;

use crate::accessor::SpecificationAccessor;
use crate::collection::ResponseCollectionParser;
use crate::error::{ParseProblem, SpecResult};
use crate::parser::{Parsed, SpecificationParser};
use crate::pointer::SpecificationPointer;
use crate::reference::ReferenceResolvingParser;

/// Operation keys of a path item, in the order they are visited.
const OPERATION_METHODS: [(&str, Method); 8] = [
    ("get", Method::GET),
    ("put", Method::PUT),
    ("post", Method::POST),
    ("delete", Method::DELETE),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("patch", Method::PATCH),
    ("trace", Method::TRACE),
];

/// Parses a `paths` object into mock parameters.
///
/// Path items may be `$ref`s. Keys other than the eight operation methods
/// (`parameters`, `summary`, extensions) are ignored.
#[derive(Debug, Clone)]
pub struct EndpointParser<P = ResponseCollectionParser> {
    responses_parser: P,
    resolver: ReferenceResolvingParser,
}

impl EndpointParser {
    /// Creates an endpoint parser with the default collection parser.
    #[must_use]
    pub fn new() -> Self {
        Self::with_responses_parser(ResponseCollectionParser::new())
    }
}

impl Default for EndpointParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EndpointParser<P> {
    /// Creates an endpoint parser using a custom collection parser.
    pub fn with_responses_parser(responses_parser: P) -> Self {
        Self {
            responses_parser,
            resolver: ReferenceResolvingParser::new(),
        }
    }
}

impl<P> SpecificationParser for EndpointParser<P>
where
    P: SpecificationParser<Output = ResponseDefinitionCollection>,
{
    type Output = Vec<MockParameters>;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
    ) -> SpecResult<Parsed<Vec<MockParameters>>> {
        let mut problems = Vec::new();
        let mut endpoints = Vec::new();

        let paths = match specification.find(pointer) {
            Some(Value::Object(paths)) => paths,
            Some(_) => {
                problems.push(ParseProblem::new("Invalid paths specification.", pointer));
                return Ok(Parsed::with_problems(endpoints, problems));
            }
            None => {
                problems.push(ParseProblem::new("Paths are not specified.", pointer));
                return Ok(Parsed::with_problems(endpoints, problems));
            }
        };

        for (path, item) in paths {
            let item_pointer = pointer.with_path_element(path.as_str());
            if !item.is_object() {
                problems.push(ParseProblem::new("Invalid path item specification.", &item_pointer));
                continue;
            }

            let resolved = match self.resolver.resolve_pointer(specification, &item_pointer) {
                Ok(resolved) => resolved,
                Err(e) => {
                    problems.push(ParseProblem::new(e.to_string(), &item_pointer));
                    continue;
                }
            };
            let item = specification.get_schema(&resolved)?;
            if !item.is_object() {
                problems.push(ParseProblem::new("Invalid path item specification.", &item_pointer));
                continue;
            }
            let item_pointer = resolved;

            for (key, method) in &OPERATION_METHODS {
                let Some(operation) = item.get(*key) else {
                    continue;
                };

                let operation_pointer = item_pointer.with_path_element(*key);
                if !operation.is_object() {
                    problems.push(ParseProblem::new(
                        "Invalid operation specification.",
                        &operation_pointer,
                    ));
                    continue;
                }

                let responses = self
                    .responses_parser
                    .parse_pointed_schema(
                        specification,
                        &operation_pointer.with_path_element("responses"),
                    )?
                    .drain_into(&mut problems);

                let mut parameters = MockParameters::new(method.clone(), path.as_str(), responses);
                if let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) {
                    parameters = parameters.with_operation_id(operation_id);
                }

                debug!(
                    method = %parameters.method,
                    path = %parameters.path,
                    responses = parameters.responses.len(),
                    "endpoint parsed"
                );
                endpoints.push(parameters);
            }
        }

        Ok(Parsed::with_problems(endpoints, problems))
    }
}

/// Parses every endpoint under `#/paths` with default settings.
pub fn parse_endpoints(
    specification: &SpecificationAccessor,
) -> SpecResult<Parsed<Vec<MockParameters>>> {
    let pointer = SpecificationPointer::root().with_path_element("paths");
    EndpointParser::new().parse_pointed_schema(specification, &pointer)
}
