//! Mock response generation.

use std::sync::Arc;

use bytes::Bytes;
use http::{Response, StatusCode};
use mimic_core::{MockError, MockParameters, MockResult, ResponseDefinition, Schema};
use serde_json::Value;
use tracing::debug;

use crate::data::{DataGenerator, ExampleDataGenerator};
use crate::negotiation::{
    negotiate_content, AcceptHeaderNegotiator, MediaTypeNegotiator, PreferredStatusNegotiator,
    ResponseStatusNegotiator,
};
use crate::request::MockRequest;
use crate::responder::{HttpResponder, Responder};

/// Body of the response sent when no acceptable media type is documented.
pub const UNSUPPORTED_MEDIA_TYPE: &str = "Unsupported media type";

const UNSUPPORTED_MEDIA_TYPE_CONTENT_TYPE: &str = "text/html";

/// Generates mock responses from negotiated status and media type.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
#[derive(Clone)]
pub struct MockResponseGenerator {
    media_type_negotiator: Arc<dyn MediaTypeNegotiator>,
    status_negotiator: Arc<dyn ResponseStatusNegotiator>,
    data_generator: Arc<dyn DataGenerator>,
    responder: Arc<dyn Responder>,
}

impl MockResponseGenerator {
    /// Creates a generator from its collaborators.
    pub fn new(
        media_type_negotiator: Arc<dyn MediaTypeNegotiator>,
        status_negotiator: Arc<dyn ResponseStatusNegotiator>,
        data_generator: Arc<dyn DataGenerator>,
        responder: Arc<dyn Responder>,
    ) -> Self {
        Self {
            media_type_negotiator,
            status_negotiator,
            data_generator,
            responder,
        }
    }

    /// Replaces the media type negotiator.
    #[must_use]
    pub fn with_media_type_negotiator(mut self, negotiator: Arc<dyn MediaTypeNegotiator>) -> Self {
        self.media_type_negotiator = negotiator;
        self
    }

    /// Replaces the status negotiator.
    #[must_use]
    pub fn with_status_negotiator(mut self, negotiator: Arc<dyn ResponseStatusNegotiator>) -> Self {
        self.status_negotiator = negotiator;
        self
    }

    /// Replaces the data generator.
    #[must_use]
    pub fn with_data_generator(mut self, data_generator: Arc<dyn DataGenerator>) -> Self {
        self.data_generator = data_generator;
        self
    }

    /// Replaces the responder.
    #[must_use]
    pub fn with_responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    /// Generates the mock response for one request.
    ///
    /// Both negotiators always run. Without a media type the result is a
    /// `406 Not Acceptable` fallback, whatever the status negotiation said.
    /// A media type without a documented status is a defect of the response
    /// model and fails with [`MockError::InvalidNegotiatedStatus`] before any
    /// data is generated. When the chosen response does not document the
    /// negotiated media type, the `Accept` ranges are matched again against
    /// that response alone; only if that fails too is the fallback sent.
    pub fn generate_response(
        &self,
        request: &MockRequest,
        parameters: &MockParameters,
    ) -> MockResult<Response<Bytes>> {
        let media_type = self
            .media_type_negotiator
            .negotiate_media_type(request, parameters);
        let status = self
            .status_negotiator
            .negotiate_response_status(request, parameters);

        let Some(media_type) = media_type else {
            debug!(operation = %parameters.label(), "no acceptable media type");
            return self.unsupported_media_type();
        };

        let definition = status
            .and_then(|status| parameters.responses.get(status))
            .ok_or_else(|| MockError::invalid_negotiated_status(parameters.label()))?;

        let Some((media_type, schema)) = settle_media_type(request, definition, media_type) else {
            debug!(
                operation = %parameters.label(),
                status = %definition.status(),
                "negotiated response documents no acceptable media type"
            );
            return self.unsupported_media_type();
        };

        let payload = self.data_generator.generate_data(schema)?;

        debug!(
            operation = %parameters.label(),
            status = definition.http_status().as_u16(),
            media_type = %media_type,
            "mock response generated"
        );
        self.responder
            .create_response(definition.http_status(), &media_type, payload)
    }

    fn unsupported_media_type(&self) -> MockResult<Response<Bytes>> {
        self.responder.create_response(
            StatusCode::NOT_ACCEPTABLE,
            UNSUPPORTED_MEDIA_TYPE_CONTENT_TYPE,
            Value::String(UNSUPPORTED_MEDIA_TYPE.to_string()),
        )
    }
}

/// Keeps the negotiated media type when the chosen response documents it,
/// otherwise negotiates again against that response's own content.
fn settle_media_type<'a>(
    request: &MockRequest,
    definition: &'a ResponseDefinition,
    negotiated: String,
) -> Option<(String, &'a Schema)> {
    if let Some(schema) = definition.schema_for(&negotiated) {
        return Some((negotiated, schema));
    }

    let available: Vec<&str> = definition.media_types().collect();
    let media_type = negotiate_content(request.accepted_ranges(), &available)?;
    debug!(
        from = %negotiated,
        to = %media_type,
        status = %definition.status(),
        "media type renegotiated for chosen response"
    );
    definition
        .schema_for(media_type)
        .map(|schema| (media_type.to_string(), schema))
}

impl Default for MockResponseGenerator {
    fn default() -> Self {
        Self::new(
            Arc::new(AcceptHeaderNegotiator),
            Arc::new(PreferredStatusNegotiator::new()),
            Arc::new(ExampleDataGenerator::new()),
            Arc::new(HttpResponder),
        )
    }
}

impl std::fmt::Debug for MockResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockResponseGenerator").finish_non_exhaustive()
    }
}
