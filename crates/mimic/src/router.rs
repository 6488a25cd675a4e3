//! Request routing to documented endpoints.

use std::collections::HashMap;

use http::Method;
use mimic_core::{MockError, MockParameters, MockResult};
use regex::Regex;
use tracing::{debug, warn};

/// A routed request.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The endpoint the request maps to.
    pub parameters: &'a MockParameters,
    /// Values of the templated path segments.
    pub path_params: HashMap<String, String>,
}

/// Maps a method and path onto the endpoint documenting it.
///
/// Templates such as `/pets/{petId}` match any non-empty segment in place of
/// `{petId}`. When several templates match, the one with fewer parameters
/// wins, then the longer one.
#[derive(Debug, Default)]
pub struct EndpointRouter {
    endpoints: Vec<MockParameters>,
    routes: HashMap<Method, Vec<CompiledRoute>>,
}

#[derive(Debug)]
struct CompiledRoute {
    endpoint: usize,
    pattern: Regex,
    param_names: Vec<String>,
}

impl EndpointRouter {
    /// Builds the routing table.
    ///
    /// A template that cannot be compiled is logged and left out.
    pub fn new(endpoints: Vec<MockParameters>) -> Self {
        let mut routes: HashMap<Method, Vec<CompiledRoute>> = HashMap::new();

        for (index, endpoint) in endpoints.iter().enumerate() {
            match compile_path(&endpoint.path) {
                Ok((pattern, param_names)) => routes
                    .entry(endpoint.method.clone())
                    .or_default()
                    .push(CompiledRoute {
                        endpoint: index,
                        pattern,
                        param_names,
                    }),
                Err(e) => warn!(path = %endpoint.path, error = %e, "skipping unroutable path"),
            }
        }

        for method_routes in routes.values_mut() {
            method_routes.sort_by(|a, b| {
                route_specificity(&endpoints[a.endpoint].path, &endpoints[b.endpoint].path)
            });
        }

        debug!(
            methods = routes.len(),
            total_routes = routes.values().map(Vec::len).sum::<usize>(),
            "endpoint router initialized"
        );

        Self { endpoints, routes }
    }

    /// Finds the endpoint for a request.
    pub fn resolve(&self, method: &Method, path: &str) -> MockResult<RouteMatch<'_>> {
        let not_found = || MockError::endpoint_not_found(method.as_str(), path);
        let routes = self.routes.get(method).ok_or_else(not_found)?;

        for route in routes {
            if let Some(captures) = route.pattern.captures(path) {
                let path_params = route
                    .param_names
                    .iter()
                    .zip(captures.iter().skip(1))
                    .filter_map(|(name, value)| Some((name.clone(), value?.as_str().to_string())))
                    .collect();

                return Ok(RouteMatch {
                    parameters: &self.endpoints[route.endpoint],
                    path_params,
                });
            }
        }

        Err(not_found())
    }

    /// Returns all endpoints in specification order.
    pub fn endpoints(&self) -> &[MockParameters] {
        &self.endpoints
    }

    /// Returns the number of endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns `true` if no endpoints are documented.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

fn compile_path(template: &str) -> Result<(Regex, Vec<String>), regex::Error> {
    if template == "/" {
        return Ok((Regex::new("^/$")?, Vec::new()));
    }

    let mut pattern = String::from("^");
    let mut param_names = Vec::new();

    for segment in template.split('/').filter(|s| !s.is_empty()) {
        pattern.push('/');

        let mut rest = segment;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            pattern.push_str(&regex::escape(&rest[..open]));
            pattern.push_str("([^/]+)");
            param_names.push(rest[open + 1..close].to_string());
            rest = &rest[close + 1..];
        }
        pattern.push_str(&regex::escape(rest));
    }

    pattern.push_str("/?$");
    Ok((Regex::new(&pattern)?, param_names))
}

/// Fewer parameters first, then longer templates.
fn route_specificity(a: &str, b: &str) -> std::cmp::Ordering {
    let a_params = a.matches('{').count();
    let b_params = b.matches('{').count();

    a_params.cmp(&b_params).then_with(|| b.len().cmp(&a.len()))
}
