//! `$ref` resolution.

use serde_json::Value;
use tracing::debug;

use crate::accessor::SpecificationAccessor;
use crate::error::{SpecError, SpecResult};
use crate::parser::{Parsed, SpecificationParser};
use crate::pointer::SpecificationPointer;

const REFERENCE_KEY: &str = "$ref";

/// Follows `$ref` indirection before delegating to another parser.
///
/// Only local references (`#/...`) are followed. Chains are followed to the
/// end; a chain that revisits a node fails with
/// [`SpecError::CircularReference`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolvingParser;

impl ReferenceResolvingParser {
    /// Creates a new resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves the node at `pointer` and parses the target with `parser`.
    ///
    /// A node without `$ref` is parsed in place.
    pub fn resolve_reference_and_parse_pointed_schema<P>(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
        parser: &P,
    ) -> SpecResult<Parsed<P::Output>>
    where
        P: SpecificationParser + ?Sized,
    {
        let target = self.resolve_pointer(specification, pointer)?;
        if target != *pointer {
            debug!(from = %pointer, to = %target, "resolved reference");
        }
        parser.parse_pointed_schema(specification, &target)
    }

    /// Returns the pointer of the node a `$ref` chain ends at.
    pub fn resolve_pointer(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
    ) -> SpecResult<SpecificationPointer> {
        let mut current = pointer.clone();
        let mut visited = Vec::new();

        loop {
            let node = specification.get_schema(&current)?;
            let Some(reference) = node.get(REFERENCE_KEY).and_then(Value::as_str) else {
                return Ok(current);
            };

            if visited.contains(&current) {
                return Err(SpecError::CircularReference {
                    reference: reference.to_string(),
                    path: current.path(),
                });
            }

            let next = local_target(reference, &current)?;
            visited.push(current);
            current = next;
        }
    }
}

fn local_target(reference: &str, at: &SpecificationPointer) -> SpecResult<SpecificationPointer> {
    if !reference.starts_with('#') {
        return Err(SpecError::UnsupportedReference {
            reference: reference.to_string(),
            path: at.path(),
        });
    }
    SpecificationPointer::parse(reference)
}
