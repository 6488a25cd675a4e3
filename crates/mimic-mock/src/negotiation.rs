//! Media type and status negotiation.
//!
//! The two negotiators are independent: each looks at the whole request and
//! the whole response collection and decides one dimension of the response.

use mimic_core::{MockParameters, StatusKey};
use tracing::debug;

use crate::accept::MediaRange;
use crate::request::MockRequest;

/// Chooses the media type of the response.
pub trait MediaTypeNegotiator: Send + Sync {
    /// Returns the chosen media type, or `None` if nothing acceptable exists.
    fn negotiate_media_type(&self, request: &MockRequest, parameters: &MockParameters)
        -> Option<String>;
}

/// Chooses the status of the response.
pub trait ResponseStatusNegotiator: Send + Sync {
    /// Returns the chosen status key, or `None` if negotiation failed.
    fn negotiate_response_status(
        &self,
        request: &MockRequest,
        parameters: &MockParameters,
    ) -> Option<StatusKey>;
}

/// Picks one of `content` for the accepted ranges.
///
/// Non-wildcard ranges are tried first, highest quality first. If none
/// matches, the first entry of `content` admitted by any wildcard range wins.
/// `accepted` is expected in descending quality order, as
/// [`parse_accept`](crate::parse_accept) returns it.
///
/// # Example
///
/// ```
/// use mimic_mock::{negotiate_content, parse_accept};
///
/// let content = ["application/xml", "application/json"];
///
/// let exact = parse_accept("text/html, application/json;q=0.8, */*;q=0.1");
/// assert_eq!(negotiate_content(&exact, &content), Some("application/json"));
///
/// let wildcard = parse_accept("*/*");
/// assert_eq!(negotiate_content(&wildcard, &content), Some("application/xml"));
///
/// let none = parse_accept("text/html");
/// assert_eq!(negotiate_content(&none, &content), None);
/// ```
#[must_use]
pub fn negotiate_content<'a>(accepted: &[MediaRange], content: &[&'a str]) -> Option<&'a str> {
    if content.is_empty() {
        return None;
    }

    let exact = accepted
        .iter()
        .filter(|range| !range.is_wildcard())
        .find_map(|range| {
            content
                .iter()
                .copied()
                .find(|candidate| range.matches_exactly(candidate))
        });
    if exact.is_some() {
        return exact;
    }

    let wildcards: Vec<&MediaRange> = accepted.iter().filter(|r| r.is_wildcard()).collect();
    content
        .iter()
        .copied()
        .find(|candidate| wildcards.iter().any(|range| range.admits(candidate)))
}

/// Negotiates against the `Accept` header.
///
/// Candidates are every media type documented by any response of the
/// operation, in specification order. [`MockResponseGenerator`] narrows the
/// result to the response the status negotiation picked.
///
/// [`MockResponseGenerator`]: crate::MockResponseGenerator
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptHeaderNegotiator;

impl MediaTypeNegotiator for AcceptHeaderNegotiator {
    fn negotiate_media_type(
        &self,
        request: &MockRequest,
        parameters: &MockParameters,
    ) -> Option<String> {
        let content = parameters.responses.media_types();
        let media_type = negotiate_content(request.accepted_ranges(), &content).map(str::to_string);

        debug!(
            operation = %parameters.label(),
            available = content.len(),
            media_type = ?media_type,
            "media type negotiated"
        );
        media_type
    }
}

/// Negotiates the status from an explicit client preference.
///
/// Order of precedence:
///
/// 1. the preferred status of the request, if documented
/// 2. the first documented 2xx status, when enabled
/// 3. the `default` response
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredStatusNegotiator {
    fallback_to_first_success: bool,
}

impl PreferredStatusNegotiator {
    /// Creates a negotiator without the 2xx fallback.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback_to_first_success: false,
        }
    }

    /// Enables or disables falling back to the first 2xx status.
    #[must_use]
    pub const fn fallback_to_first_success(mut self, enabled: bool) -> Self {
        self.fallback_to_first_success = enabled;
        self
    }
}

impl ResponseStatusNegotiator for PreferredStatusNegotiator {
    fn negotiate_response_status(
        &self,
        request: &MockRequest,
        parameters: &MockParameters,
    ) -> Option<StatusKey> {
        let responses = &parameters.responses;

        let status = request
            .preferred_status()
            .filter(|status| responses.contains(*status))
            .or_else(|| {
                self.fallback_to_first_success
                    .then(|| responses.first_success())
                    .flatten()
            })
            .or_else(|| responses.contains(StatusKey::Default).then_some(StatusKey::Default));

        debug!(
            operation = %parameters.label(),
            preferred = ?request.preferred_status(),
            status = ?status,
            "response status negotiated"
        );
        status
    }
}
