//! Response collection parsing.
//!
//! [`ResponseCollectionParser`] turns an operation's `responses` object into
//! a [`ResponseDefinitionCollection`] keyed by normalized [`StatusKey`]s.
//!
//! Every entry is validated on its own. An invalid entry is reported as a
//! [`ParseProblem`] and skipped; the rest of the collection is still built.

use http::StatusCode;
use mimic_core::{ResponseDefinition, ResponseDefinitionCollection, StatusKey};
use serde_json::Value;
use tracing::debug;

use crate::accessor::SpecificationAccessor;
use crate::error::{ParseProblem, SpecResult};
use crate::parser::{Parsed, SpecificationParser};
use crate::pointer::SpecificationPointer;
use crate::reference::ReferenceResolvingParser;
use crate::response::ResponseParser;

const INVALID_STATUS_CODE: &str = "Invalid status code. Must be integer or \"default\".";
const INVALID_RESPONSE: &str = "Invalid response specification.";
const INVALID_RESPONSES: &str = "Invalid responses specification.";
const MISSING_RESPONSES: &str = "Responses are not specified.";

/// Parses a `responses` object.
///
/// # Example
///
/// ```
/// use mimic_core::StatusKey;
/// use mimic_spec::{
///     ResponseCollectionParser, SpecificationAccessor, SpecificationParser, SpecificationPointer,
/// };
///
/// let specification = SpecificationAccessor::from_json_str(
///     r#"{"responses": {"2XX": {}, "404": {"description": "missing"}}}"#,
/// ).unwrap();
/// let pointer = SpecificationPointer::root().with_path_element("responses");
///
/// let parsed = ResponseCollectionParser::new()
///     .parse_pointed_schema(&specification, &pointer)
///     .unwrap();
///
/// assert!(parsed.value.contains(StatusKey::Code(404)));
/// assert_eq!(parsed.problems.len(), 1);
/// assert_eq!(parsed.problems[0].path, "#/responses/2XX");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseCollectionParser<P = ResponseParser> {
    response_parser: P,
    resolver: ReferenceResolvingParser,
    default_status: StatusCode,
}

impl ResponseCollectionParser {
    /// Creates a parser with the default response parser.
    ///
    /// The `default` response renders as `200 OK`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_response_parser(ResponseParser::new())
    }
}

impl Default for ResponseCollectionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ResponseCollectionParser<P> {
    /// Creates a parser delegating each response body to `response_parser`.
    pub fn with_response_parser(response_parser: P) -> Self {
        Self {
            response_parser,
            resolver: ReferenceResolvingParser::new(),
            default_status: StatusCode::OK,
        }
    }

    /// Sets the HTTP status the `default` response renders as.
    #[must_use]
    pub fn default_status(mut self, status: StatusCode) -> Self {
        self.default_status = status;
        self
    }

    /// Checks one entry, recording every problem it has.
    fn validate_entry(
        token: &str,
        raw: &Value,
        pointer: &SpecificationPointer,
        problems: &mut Vec<ParseProblem>,
    ) -> Option<StatusKey> {
        let status = StatusKey::parse_token(token).ok();
        if status.is_none() {
            problems.push(ParseProblem::new(INVALID_STATUS_CODE, pointer));
        }
        if !raw.is_object() {
            problems.push(ParseProblem::new(INVALID_RESPONSE, pointer));
            return None;
        }
        status
    }
}

impl<P> SpecificationParser for ResponseCollectionParser<P>
where
    P: SpecificationParser<Output = ResponseDefinition>,
{
    type Output = ResponseDefinitionCollection;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
    ) -> SpecResult<Parsed<ResponseDefinitionCollection>> {
        let mut problems = Vec::new();

        let responses = match specification.find(pointer) {
            Some(Value::Object(responses)) => responses,
            Some(_) => {
                problems.push(ParseProblem::new(INVALID_RESPONSES, pointer));
                return Ok(Parsed::with_problems(
                    ResponseDefinitionCollection::empty(),
                    problems,
                ));
            }
            None => {
                problems.push(ParseProblem::new(MISSING_RESPONSES, pointer));
                return Ok(Parsed::with_problems(
                    ResponseDefinitionCollection::empty(),
                    problems,
                ));
            }
        };

        let mut builder = ResponseDefinitionCollection::builder();

        for (token, raw) in responses {
            let entry_pointer = pointer.with_path_element(token.as_str());
            let Some(status) = Self::validate_entry(token, raw, &entry_pointer, &mut problems)
            else {
                continue;
            };

            let target = match self.resolver.resolve_pointer(specification, &entry_pointer) {
                Ok(target) => target,
                Err(e) => {
                    problems.push(ParseProblem::new(e.to_string(), &entry_pointer));
                    continue;
                }
            };
            if !specification.get_schema(&target)?.is_object() {
                problems.push(ParseProblem::new(INVALID_RESPONSE, &entry_pointer));
                continue;
            }

            let parsed = self
                .response_parser
                .parse_pointed_schema(specification, &target)?;

            let mut definition = parsed.drain_into(&mut problems);
            definition.assign_status(status, self.default_status);
            builder.insert(definition);

            debug!(
                path = %entry_pointer,
                "Response with status code \"{}\" was parsed.",
                status
            );
        }

        Ok(Parsed::with_problems(builder.build(), problems))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn parse(responses: Value) -> Parsed<ResponseDefinitionCollection> {
        parse_with(ResponseCollectionParser::new(), responses)
    }

    fn parse_with(
        parser: ResponseCollectionParser,
        responses: Value,
    ) -> Parsed<ResponseDefinitionCollection> {
        let spec = SpecificationAccessor::new(json!({
            "components": {
                "responses": {
                    "NotFound": {
                        "description": "Not found",
                        "content": {"application/json": {"schema": {"type": "object"}}}
                    },
                    "Loop": {"$ref": "#/components/responses/Loop"},
                    "Scalar": "oops"
                }
            },
            "responses": responses
        }));
        let pointer = SpecificationPointer::root().with_path_element("responses");
        parser.parse_pointed_schema(&spec, &pointer).unwrap()
    }

    #[test]
    fn test_parses_codes_and_default() {
        let parsed = parse(json!({
            "200": {"content": {"application/json": {"schema": {"type": "object"}}}},
            "default": {"content": {}}
        }));

        assert!(parsed.is_clean());
        let keys: Vec<StatusKey> = parsed.value.keys().collect();
        assert_eq!(keys, [StatusKey::Code(200), StatusKey::Default]);

        let ok = parsed.value.get(StatusKey::Code(200)).unwrap();
        assert_eq!(ok.status(), StatusKey::Code(200));
        assert_eq!(ok.http_status(), StatusCode::OK);

        let default = parsed.value.default_response().unwrap();
        assert_eq!(default.status(), StatusKey::Default);
        assert_eq!(default.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_empty_responses() {
        let parsed = parse(json!({}));
        assert!(parsed.value.is_empty());
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_missing_responses() {
        let spec = SpecificationAccessor::new(json!({}));
        let pointer = SpecificationPointer::root().with_path_element("responses");
        let parsed = ResponseCollectionParser::new()
            .parse_pointed_schema(&spec, &pointer)
            .unwrap();

        assert!(parsed.value.is_empty());
        assert_eq!(parsed.problems.len(), 1);
        assert_eq!(parsed.problems[0].path, "#/responses");
    }

    #[test]
    fn test_non_object_responses() {
        let parsed = parse(json!(["200"]));
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.problems[0].message, INVALID_RESPONSES);
    }

    #[test]
    fn test_invalid_status_token() {
        let parsed = parse(json!({"2XX": {}, "201": {}}));

        assert_eq!(parsed.value.keys().collect::<Vec<_>>(), [StatusKey::Code(201)]);
        assert_eq!(parsed.problems.len(), 1);
        assert_eq!(parsed.problems[0].message, INVALID_STATUS_CODE);
        assert_eq!(parsed.problems[0].path, "#/responses/2XX");
    }

    #[test]
    fn test_out_of_range_status() {
        let parsed = parse(json!({"600": {}, "42": {}}));
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.problems.len(), 2);
        assert!(parsed.problems.iter().all(|p| p.message == INVALID_STATUS_CODE));
    }

    #[test]
    fn test_non_object_response() {
        let parsed = parse(json!({"200": "OK"}));
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.problems.len(), 1);
        assert_eq!(parsed.problems[0].message, INVALID_RESPONSE);
        assert_eq!(parsed.problems[0].path, "#/responses/200");
    }

    #[test]
    fn test_both_problems_reported() {
        let parsed = parse(json!({"abc": 1}));
        let messages: Vec<&str> = parsed.problems.iter().map(|p| p.message.as_str()).collect();
        assert_eq!(messages, [INVALID_STATUS_CODE, INVALID_RESPONSE]);
    }

    #[test]
    fn test_zero_and_default_collide() {
        let parsed = parse(json!({
            "default": {"description": "first"},
            "200": {},
            "0": {"description": "second"}
        }));

        assert_eq!(parsed.value.len(), 2);
        assert_eq!(
            parsed.value.keys().collect::<Vec<_>>(),
            [StatusKey::Default, StatusKey::Code(200)]
        );
        assert_eq!(
            parsed.value.default_response().unwrap().description(),
            Some("second")
        );
    }

    #[test]
    fn test_referenced_response() {
        let parsed = parse(json!({"404": {"$ref": "#/components/responses/NotFound"}}));

        assert!(parsed.is_clean());
        let not_found = parsed.value.get(StatusKey::Code(404)).unwrap();
        assert_eq!(not_found.status(), StatusKey::Code(404));
        assert_eq!(not_found.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.description(), Some("Not found"));
    }

    #[test]
    fn test_reference_failures_skip_entry() {
        let parsed = parse(json!({
            "404": {"$ref": "#/components/responses/Missing"},
            "500": {"$ref": "#/components/responses/Loop"},
            "200": {}
        }));

        assert_eq!(parsed.value.keys().collect::<Vec<_>>(), [StatusKey::Code(200)]);
        let paths: Vec<&str> = parsed.problems.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["#/responses/404", "#/responses/500"]);
    }

    #[test]
    fn test_reference_to_non_object_skips_entry() {
        let parsed = parse(json!({"404": {"$ref": "#/components/responses/Scalar"}}));

        assert!(parsed.value.is_empty());
        assert_eq!(parsed.problems.len(), 1);
        assert_eq!(parsed.problems[0].path, "#/responses/404");
        assert_eq!(parsed.problems[0].message, INVALID_RESPONSE);
    }

    #[test]
    fn test_custom_default_status() {
        let parser = ResponseCollectionParser::new().default_status(StatusCode::INTERNAL_SERVER_ERROR);
        let parsed = parse_with(parser, json!({"default": {}}));

        assert_eq!(
            parsed.value.default_response().unwrap().http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    proptest! {
        #[test]
        fn prop_valid_entry_is_keyed_by_status(code in 100u16..=599) {
            let parsed = parse(json!({ code.to_string(): {} }));

            prop_assert!(parsed.is_clean());
            prop_assert_eq!(parsed.value.len(), 1);
            let definition = parsed.value.get(StatusKey::Code(code)).unwrap();
            prop_assert_eq!(definition.status(), StatusKey::Code(code));
            prop_assert_eq!(definition.http_status().as_u16(), code);
        }

        #[test]
        fn prop_non_integer_token_is_reported(token in "[a-zA-Z][a-zA-Z0-9]{0,6}") {
            prop_assume!(token != "default");
            let parsed = parse(json!({ token.clone(): {} }));

            prop_assert!(parsed.value.is_empty());
            prop_assert_eq!(parsed.problems.len(), 1);
            prop_assert_eq!(&parsed.problems[0].path, &format!("#/responses/{token}"));
        }

        #[test]
        fn prop_scalar_response_is_reported(code in 100u16..=599, value in any::<i64>()) {
            let parsed = parse(json!({ code.to_string(): value }));

            prop_assert!(parsed.value.is_empty());
            prop_assert_eq!(parsed.problems.len(), 1);
            prop_assert_eq!(&parsed.problems[0].message, INVALID_RESPONSE);
        }
    }
}
