//! HTTP response assembly.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use mimic_core::{MockError, MockResult};
use serde_json::Value;

/// Turns a status, media type and payload into an HTTP response.
pub trait Responder: Send + Sync {
    /// Builds the response.
    fn create_response(
        &self,
        status: StatusCode,
        media_type: &str,
        payload: Value,
    ) -> MockResult<Response<Bytes>>;
}

/// Default responder producing `http::Response<Bytes>`.
///
/// | Media type | Body |
/// |------------|------|
/// | `application/json`, `*/*+json` | JSON serialized payload |
/// | anything else, string payload | the string as-is |
/// | anything else, other payload | JSON text of the payload |
///
/// The media type is sent back as `Content-Type`.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use mimic_mock::{HttpResponder, Responder};
/// use serde_json::json;
///
/// let response = HttpResponder
///     .create_response(StatusCode::OK, "text/plain", json!("hello"))
///     .unwrap();
///
/// assert_eq!(response.headers()["content-type"], "text/plain");
/// assert_eq!(response.body().as_ref(), b"hello");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpResponder;

impl HttpResponder {
    fn body(media_type: &str, payload: Value) -> MockResult<Bytes> {
        if is_json(media_type) {
            let body = serde_json::to_vec(&payload)
                .map_err(|e| MockError::response_with_source("failed to serialize payload", e))?;
            return Ok(Bytes::from(body));
        }

        Ok(match payload {
            Value::String(text) => Bytes::from(text),
            other => Bytes::from(other.to_string()),
        })
    }
}

impl Responder for HttpResponder {
    fn create_response(
        &self,
        status: StatusCode,
        media_type: &str,
        payload: Value,
    ) -> MockResult<Response<Bytes>> {
        let content_type = HeaderValue::from_str(media_type).map_err(|e| {
            MockError::response_with_source(format!("invalid media type '{media_type}'"), e)
        })?;

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, content_type)
            .body(Self::body(media_type, payload)?)
            .map_err(|e| MockError::response_with_source("failed to build response", e))
    }
}

fn is_json(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || essence
            .rsplit_once('+')
            .is_some_and(|(_, suffix)| suffix.eq_ignore_ascii_case("json"))
}
