//! Specification error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::pointer::SpecificationPointer;

/// Result type for specification operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that stop a specification from being loaded or traversed.
///
/// Problems inside an otherwise readable document are reported as
/// [`ParseProblem`]s instead.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Failed to read a specification file.
    #[error("failed to read specification file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension names no supported format.
    #[error("unsupported specification format: {path}")]
    UnsupportedFormat {
        /// Path to the file.
        path: PathBuf,
    },

    /// JSON parsing error.
    #[error("failed to parse JSON specification: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML specification: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Nothing exists at the requested pointer.
    #[error("no specification node at {path}")]
    PathNotFound {
        /// The pointer path.
        path: String,
    },

    /// A pointer string is not a local JSON pointer.
    #[error("invalid specification pointer: {pointer}")]
    InvalidPointer {
        /// The rejected pointer string.
        pointer: String,
    },

    /// A `$ref` targets another document.
    #[error("unsupported reference '{reference}' at {path}: only local references are resolved")]
    UnsupportedReference {
        /// The reference value.
        reference: String,
        /// Where the reference was found.
        path: String,
    },

    /// A `$ref` chain loops back on itself.
    #[error("circular reference '{reference}' at {path}")]
    CircularReference {
        /// The reference value closing the loop.
        reference: String,
        /// Where the reference was found.
        path: String,
    },
}

impl SpecError {
    /// Create a new path not found error.
    pub fn path_not_found(pointer: &SpecificationPointer) -> Self {
        Self::PathNotFound {
            path: pointer.path(),
        }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }
}

/// A non-fatal validation problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProblem {
    /// Error message.
    pub message: String,
    /// Pointer path to the offending node.
    pub path: String,
}

impl ParseProblem {
    /// Creates a problem located at a pointer.
    pub fn new(message: impl Into<String>, pointer: &SpecificationPointer) -> Self {
        Self {
            message: message.into(),
            path: pointer.path(),
        }
    }
}

impl fmt::Display for ParseProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
