//! Single response parsing.

use mimic_core::{ResponseDefinition, Schema};
use serde_json::Value;

use crate::accessor::SpecificationAccessor;
use crate::error::{ParseProblem, SpecResult};
use crate::parser::{Parsed, SpecificationParser};
use crate::pointer::SpecificationPointer;
use crate::reference::ReferenceResolvingParser;
use crate::schema::SchemaParser;

/// Parses one response object into a [`ResponseDefinition`].
///
/// Reads `description` and the `content` map. Each media type's `schema`
/// goes through `$ref` resolution; a media type without a schema gets the
/// permissive empty schema. The status key is left for the collection parser
/// to assign.
#[derive(Debug, Clone, Default)]
pub struct ResponseParser<S = SchemaParser> {
    schema_parser: S,
    resolver: ReferenceResolvingParser,
}

impl ResponseParser {
    /// Creates a response parser with the default schema parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> ResponseParser<S> {
    /// Creates a response parser with a custom schema parser.
    pub fn with_schema_parser(schema_parser: S) -> Self {
        Self {
            schema_parser,
            resolver: ReferenceResolvingParser::new(),
        }
    }
}

impl<S> SpecificationParser for ResponseParser<S>
where
    S: SpecificationParser<Output = Schema>,
{
    type Output = ResponseDefinition;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
    ) -> SpecResult<Parsed<ResponseDefinition>> {
        let node = specification.get_schema(pointer)?;
        let mut definition = ResponseDefinition::new();
        let mut problems = Vec::new();

        match node.get("description") {
            None => {}
            Some(Value::String(description)) => {
                definition = definition.with_description(description.clone());
            }
            Some(_) => problems.push(ParseProblem::new(
                "Invalid response description.",
                &pointer.with_path_element("description"),
            )),
        }

        let content_pointer = pointer.with_path_element("content");
        match node.get("content") {
            None => {}
            Some(Value::Object(content)) => {
                for (media_type, media) in content {
                    let media_pointer = content_pointer.with_path_element(media_type.as_str());
                    if !media.is_object() {
                        problems.push(ParseProblem::new(
                            "Invalid media type specification.",
                            &media_pointer,
                        ));
                        continue;
                    }

                    let schema = if media.get("schema").is_some() {
                        let schema_pointer = media_pointer.with_path_element("schema");
                        match self.resolver.resolve_reference_and_parse_pointed_schema(
                            specification,
                            &schema_pointer,
                            &self.schema_parser,
                        ) {
                            Ok(parsed) => parsed.drain_into(&mut problems),
                            Err(e) => {
                                problems.push(ParseProblem::new(e.to_string(), &schema_pointer));
                                continue;
                            }
                        }
                    } else {
                        Schema::any()
                    };

                    definition = definition.with_content(media_type.as_str(), schema);
                }
            }
            Some(_) => problems.push(ParseProblem::new(
                "Invalid response content.",
                &content_pointer,
            )),
        }

        Ok(Parsed::with_problems(definition, problems))
    }
}
