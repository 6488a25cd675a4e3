//! The negotiation view of an incoming request.

use http::header::{HeaderMap, HeaderName, ACCEPT};
use http::Request;
use mimic_core::StatusKey;

use crate::accept::{parse_accept, MediaRange};

/// Header a client uses to ask for a specific documented status.
pub const DEFAULT_STATUS_HEADER: &str = "x-mock-status";

/// What the negotiators need to know about a request.
///
/// A request without an `Accept` header accepts `*/*`.
///
/// # Example
///
/// ```
/// use mimic_core::StatusKey;
/// use mimic_mock::MockRequest;
///
/// let request = http::Request::builder()
///     .header("accept", "application/json")
///     .header("x-mock-status", "404")
///     .body(())
///     .unwrap();
///
/// let mock_request = MockRequest::from_request(&request);
/// assert_eq!(mock_request.preferred_status(), Some(StatusKey::Code(404)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    accept: Vec<MediaRange>,
    preferred_status: Option<StatusKey>,
}

impl MockRequest {
    /// A request accepting anything, without a status preference.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accept: vec![MediaRange::any()],
            preferred_status: None,
        }
    }

    /// Replaces the accepted ranges with those of an `Accept` header value.
    #[must_use]
    pub fn with_accept(mut self, header: &str) -> Self {
        self.accept = parse_accept(header);
        self
    }

    /// Sets the preferred status.
    #[must_use]
    pub fn with_preferred_status(mut self, status: StatusKey) -> Self {
        self.preferred_status = Some(status);
        self
    }

    /// Reads the request headers using the default status header.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_headers(request.headers(), &HeaderName::from_static(DEFAULT_STATUS_HEADER))
    }

    /// Reads `Accept` and the status preference from `headers`.
    ///
    /// A status header that is not a concrete status code is ignored. All
    /// `Accept` header lines are combined.
    pub fn from_headers(headers: &HeaderMap, status_header: &HeaderName) -> Self {
        let mut request = Self::new();

        let accept: Vec<&str> = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        if !accept.is_empty() {
            request = request.with_accept(&accept.join(","));
        }

        request.preferred_status = headers
            .get(status_header)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| StatusKey::parse_token(value.trim()).ok())
            .filter(|status| !status.is_default());

        request
    }

    /// Returns the accepted ranges, highest quality first.
    #[must_use]
    pub fn accepted_ranges(&self) -> &[MediaRange] {
        &self.accept
    }

    /// Returns the preferred status, if the client asked for one.
    #[must_use]
    pub fn preferred_status(&self) -> Option<StatusKey> {
        self.preferred_status
    }
}

impl Default for MockRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_accept_accepts_anything() {
        let request = Request::builder().body(()).unwrap();
        let mock_request = MockRequest::from_request(&request);

        assert_eq!(mock_request.accepted_ranges(), [MediaRange::any()]);
        assert_eq!(mock_request.preferred_status(), None);
    }

    #[test]
    fn test_multiple_accept_lines_are_combined() {
        let request = Request::builder()
            .header("accept", "text/html;q=0.5")
            .header("accept", "application/json")
            .body(())
            .unwrap();
        let mock_request = MockRequest::from_request(&request);

        let types: Vec<&str> = mock_request
            .accepted_ranges()
            .iter()
            .map(|r| r.media_type().essence_str())
            .collect();
        assert_eq!(types, ["application/json", "text/html"]);
    }

    #[test]
    fn test_custom_status_header() {
        let mut headers = HeaderMap::new();
        headers.insert("prefer-status", "503".parse().unwrap());
        let header = HeaderName::from_static("prefer-status");

        let mock_request = MockRequest::from_headers(&headers, &header);
        assert_eq!(mock_request.preferred_status(), Some(StatusKey::Code(503)));
    }

    #[test]
    fn test_unusable_status_preference_is_ignored() {
        for value in ["teapot", "default", "0", "999"] {
            let mut headers = HeaderMap::new();
            headers.insert(DEFAULT_STATUS_HEADER, value.parse().unwrap());
            let header = HeaderName::from_static(DEFAULT_STATUS_HEADER);

            let mock_request = MockRequest::from_headers(&headers, &header);
            assert_eq!(mock_request.preferred_status(), None, "value {value}");
        }
    }
}
