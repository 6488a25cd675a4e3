//! Error types for Mimic.
//!
//! This module provides [`MockError`], the error type returned by request-time
//! mock generation.
//!
//! A request that cannot be satisfied (no acceptable media type) is not an
//! error: the generator answers it with a fixed fallback response. Errors are
//! reserved for defects in the response model and for failing collaborators.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`MockError`].
pub type MockResult<T> = Result<T, MockError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The response model is inconsistent; a build-time defect.
    Programming,
    /// The data generator failed.
    Generation,
    /// The responder failed to assemble a response.
    Response,
    /// No documented endpoint matches the request.
    NotFound,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Programming | Self::Generation | Self::Response => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Standard error type for Mimic.
///
/// # Example
///
/// ```
/// use mimic_core::{ErrorCategory, MockError};
///
/// let error = MockError::invalid_negotiated_status("listPets");
/// assert_eq!(error.category(), ErrorCategory::Programming);
/// ```
#[derive(Error, Debug)]
pub enum MockError {
    /// Status negotiation produced no usable status after a media type matched.
    #[error("Invalid response status code negotiated for {operation}")]
    InvalidNegotiatedStatus {
        /// The operation being mocked.
        operation: String,
    },

    /// The data generator failed.
    #[error("Data generation failed: {message}")]
    Generation {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The responder failed.
    #[error("Response assembly failed: {message}")]
    Response {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// No endpoint matches the request.
    #[error("No endpoint found for {method} {path}")]
    EndpointNotFound {
        /// HTTP method.
        method: String,
        /// Request path.
        path: String,
    },
}

impl MockError {
    /// Creates an invalid negotiated status error.
    #[must_use]
    pub fn invalid_negotiated_status(operation: impl Into<String>) -> Self {
        Self::InvalidNegotiatedStatus {
            operation: operation.into(),
        }
    }

    /// Creates a data generation error.
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a data generation error with a source error.
    pub fn generation_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Generation {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a response assembly error.
    #[must_use]
    pub fn response(message: impl Into<String>) -> Self {
        Self::Response {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a response assembly error with a source error.
    pub fn response_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Response {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates an endpoint not found error.
    #[must_use]
    pub fn endpoint_not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::EndpointNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidNegotiatedStatus { .. } => ErrorCategory::Programming,
            Self::Generation { .. } => ErrorCategory::Generation,
            Self::Response { .. } => ErrorCategory::Response,
            Self::EndpointNotFound { .. } => ErrorCategory::NotFound,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Converts this error to a serializable error envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNegotiatedStatus { .. } => "INVALID_NEGOTIATED_STATUS",
            Self::Generation { .. } => "GENERATION_FAILED",
            Self::Response { .. } => "RESPONSE_FAILED",
            Self::EndpointNotFound { .. } => "ENDPOINT_NOT_FOUND",
        }
    }
}

/// Serializable error envelope for HTTP responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Error category.
    pub category: ErrorCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_negotiated_status() {
        let error = MockError::invalid_negotiated_status("getPet");
        assert_eq!(error.category(), ErrorCategory::Programming);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error
            .to_string()
            .contains("Invalid response status code negotiated"));
    }

    #[test]
    fn test_generation_with_source() {
        let error = MockError::generation_with_source(
            "schema too deep",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert_eq!(error.category(), ErrorCategory::Generation);
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_endpoint_not_found() {
        let error = MockError::endpoint_not_found("GET", "/nope");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert!(error.to_string().contains("GET /nope"));
    }

    #[test]
    fn test_error_envelope_serialization() {
        let error = MockError::response("header value rejected");
        let json = serde_json::to_string(&error.to_envelope()).expect("serialization should work");
        assert!(json.contains("\"code\":\"RESPONSE_FAILED\""));
        assert!(json.contains("\"category\":\"response\""));
    }

    #[test]
    fn test_all_error_categories_have_status_codes() {
        let categories = [
            ErrorCategory::Programming,
            ErrorCategory::Generation,
            ErrorCategory::Response,
            ErrorCategory::NotFound,
        ];

        for category in categories {
            let status = category.default_status_code();
            assert!(
                status.is_client_error() || status.is_server_error(),
                "Category {:?} should map to error status code, got {}",
                category,
                status
            );
        }
    }
}
