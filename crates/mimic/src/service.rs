//! The assembled mock service.

use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Request, Response, StatusCode};
use mimic_config::{ConfigError, MimicConfig};
use mimic_core::MockResult;
use mimic_mock::{
    ExampleDataGenerator, MockRequest, MockResponseGenerator, PreferredStatusNegotiator,
};
use mimic_spec::{
    EndpointParser, ParseProblem, ResponseCollectionParser, SpecificationAccessor,
    SpecificationParser, SpecificationPointer,
};
use tracing::{info, warn};

use crate::error::ServiceError;
use crate::router::EndpointRouter;

/// Answers HTTP requests with responses mocked from an API description.
///
/// Built once from a parsed document and a configuration, then shared
/// read-only between requests.
///
/// # Example
///
/// ```
/// use mimic::{MimicConfig, MockService, SpecificationAccessor};
///
/// let spec = SpecificationAccessor::from_json_str(r#"{
///     "paths": {
///         "/ping": {
///             "get": {
///                 "responses": {
///                     "200": {
///                         "description": "pong",
///                         "content": {"text/plain": {"schema": {"type": "string", "example": "pong"}}}
///                     }
///                 }
///             }
///         }
///     }
/// }"#).unwrap();
///
/// let service = MockService::new(&spec, &MimicConfig::default()).unwrap();
///
/// // Without a `default` response the status has to be asked for, unless
/// // `negotiation.fallback_to_first_success` is enabled.
/// let request = http::Request::get("/ping")
///     .header("x-mock-status", "200")
///     .body(())
///     .unwrap();
/// let response = service.handle(&request).unwrap();
///
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.body().as_ref(), b"pong");
/// ```
#[derive(Debug)]
pub struct MockService {
    router: EndpointRouter,
    generator: MockResponseGenerator,
    status_header: HeaderName,
    problems: Vec<ParseProblem>,
}

impl MockService {
    /// Builds a service from a loaded document.
    ///
    /// Problems found while parsing are logged and kept; only a broken
    /// configuration or an unreadable document is an error.
    pub fn new(
        specification: &SpecificationAccessor,
        config: &MimicConfig,
    ) -> Result<Self, ServiceError> {
        config.validate()?;

        let negotiation = &config.negotiation;
        let status_header = HeaderName::from_bytes(negotiation.status_header.as_bytes())
            .map_err(|e| ConfigError::invalid_value("negotiation.status_header", e.to_string()))?;
        let default_status = StatusCode::from_u16(negotiation.default_response_status).map_err(
            |e| ConfigError::invalid_value("negotiation.default_response_status", e.to_string()),
        )?;

        let parser = EndpointParser::with_responses_parser(
            ResponseCollectionParser::new().default_status(default_status),
        );
        let pointer = SpecificationPointer::root().with_path_element("paths");
        let (endpoints, problems) = parser
            .parse_pointed_schema(specification, &pointer)?
            .into_parts();

        for problem in &problems {
            warn!(path = %problem.path, problem = %problem.message, "specification problem");
        }

        let generator = MockResponseGenerator::default()
            .with_status_negotiator(Arc::new(
                PreferredStatusNegotiator::new()
                    .fallback_to_first_success(negotiation.fallback_to_first_success),
            ))
            .with_data_generator(Arc::new(
                ExampleDataGenerator::new()
                    .with_document(Arc::new(specification.document().clone())),
            ));

        let router = EndpointRouter::new(endpoints);

        info!(
            endpoints = router.len(),
            problems = problems.len(),
            status_header = %status_header,
            "mock service ready"
        );

        Ok(Self {
            router,
            generator,
            status_header,
            problems,
        })
    }

    /// Loads the document named by `config.specification.path` and builds a
    /// service from it.
    pub fn from_config(config: &MimicConfig) -> Result<Self, ServiceError> {
        let specification = SpecificationAccessor::from_file(&config.specification.path)?;
        Self::new(&specification, config)
    }

    /// Problems found while parsing the document.
    pub fn problems(&self) -> &[ParseProblem] {
        &self.problems
    }

    /// Number of routable endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.router.len()
    }

    /// The endpoint router.
    pub fn router(&self) -> &EndpointRouter {
        &self.router
    }

    /// Mocks the response to `request`.
    pub fn handle<B>(&self, request: &Request<B>) -> MockResult<Response<Bytes>> {
        let matched = self.router.resolve(request.method(), request.uri().path())?;
        let mock_request = MockRequest::from_headers(request.headers(), &self.status_header);

        self.generator
            .generate_response(&mock_request, matched.parameters)
    }

    /// Like [`handle`](Self::handle), rendering failures as JSON error
    /// envelopes.
    pub fn respond<B>(&self, request: &Request<B>) -> Response<Bytes> {
        self.handle(request).unwrap_or_else(|error| {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                error = %error,
                "mock request failed"
            );

            let body = serde_json::to_vec(&error.to_envelope()).unwrap_or_default();
            let mut response = Response::new(Bytes::from(body));
            *response.status_mut() = error.status_code();
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        })
    }
}
