//! Schema node parsing.

use mimic_core::Schema;
use serde_json::Value;

use crate::accessor::SpecificationAccessor;
use crate::error::{ParseProblem, SpecResult};
use crate::parser::{Parsed, SpecificationParser};
use crate::pointer::SpecificationPointer;

/// Parses a schema object into an opaque [`Schema`].
///
/// Boolean schemas are accepted as-is. Any other non-object node is reported
/// and replaced by the permissive empty schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaParser;

impl SpecificationParser for SchemaParser {
    type Output = Schema;

    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
    ) -> SpecResult<Parsed<Schema>> {
        let node = specification.get_schema(pointer)?;
        match node {
            Value::Object(_) | Value::Bool(_) => Ok(Parsed::new(Schema::new(node.clone()))),
            _ => Ok(Parsed::with_problems(
                Schema::any(),
                vec![ParseProblem::new("Invalid schema specification.", pointer)],
            )),
        }
    }
}
