//! The parser strategy.

use crate::accessor::SpecificationAccessor;
use crate::error::{ParseProblem, SpecResult};
use crate::pointer::SpecificationPointer;

/// A parser for one kind of specification node.
///
/// Implementations read the node at `pointer` and return the typed value
/// together with any validation problems found on the way. An `Err` is
/// reserved for failures that leave nothing to build, such as a pointer that
/// addresses no node at all.
pub trait SpecificationParser {
    /// The typed value this parser produces.
    type Output;

    /// Parses the node addressed by `pointer`.
    fn parse_pointed_schema(
        &self,
        specification: &SpecificationAccessor,
        pointer: &SpecificationPointer,
    ) -> SpecResult<Parsed<Self::Output>>;
}

/// A parsed value and the problems collected while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// The value that could be built.
    pub value: T,
    /// Validation problems, in discovery order.
    pub problems: Vec<ParseProblem>,
}

impl<T> Parsed<T> {
    /// A value without problems.
    pub fn new(value: T) -> Self {
        Self {
            value,
            problems: Vec::new(),
        }
    }

    /// A value with the given problems.
    pub fn with_problems(value: T, problems: Vec<ParseProblem>) -> Self {
        Self { value, problems }
    }

    /// Returns `true` when no problems were recorded.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Maps the value, keeping the problems.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            problems: self.problems,
        }
    }

    /// Moves the problems into `sink` and returns the value.
    pub fn drain_into(self, sink: &mut Vec<ParseProblem>) -> T {
        sink.extend(self.problems);
        self.value
    }

    /// Splits into value and problems.
    pub fn into_parts(self) -> (T, Vec<ParseProblem>) {
        (self.value, self.problems)
    }
}
