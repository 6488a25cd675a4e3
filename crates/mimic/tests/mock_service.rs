//! End-to-end tests: document in, mocked HTTP responses out.

use std::io::Write;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Request, StatusCode};
use mimic::prelude::*;
use serde_json::{json, Value};

const PETSTORE: &str = r##"{
    "openapi": "3.0.3",
    "info": {"title": "Petstore", "version": "1.0.0"},
    "paths": {
        "/pets": {
            "get": {
                "operationId": "listPets",
                "responses": {
                    "200": {
                        "description": "A list of pets",
                        "content": {
                            "application/json": {
                                "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}
                            }
                        }
                    },
                    "default": {
                        "description": "Unexpected error",
                        "content": {
                            "application/json": {"schema": {"$ref": "#/components/schemas/Error"}}
                        }
                    }
                }
            }
        },
        "/pets/{petId}": {
            "get": {
                "operationId": "showPetById",
                "responses": {
                    "200": {
                        "description": "The pet",
                        "content": {
                            "application/json": {"schema": {"$ref": "#/components/schemas/Pet"}},
                            "application/xml": {"schema": {"type": "string", "example": "<pet/>"}}
                        }
                    },
                    "404": {
                        "description": "Not found",
                        "content": {
                            "application/json": {"schema": {"$ref": "#/components/schemas/Error"}}
                        }
                    }
                }
            },
            "delete": {
                "operationId": "deletePet",
                "responses": {
                    "default": {"description": "Deleted"},
                    "204": {"description": "No content"}
                }
            }
        },
        "/broken": {
            "get": {
                "responses": {
                    "2000": {"description": "bad key"},
                    "200": "not an object"
                }
            }
        }
    },
    "components": {
        "schemas": {
            "Pet": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer", "example": 7},
                    "name": {"type": "string", "example": "Rex"}
                }
            },
            "Error": {
                "type": "object",
                "properties": {
                    "code": {"type": "integer", "example": 500},
                    "message": {"type": "string", "example": "boom"}
                }
            }
        }
    }
}"##;

fn service() -> MockService {
    let spec = SpecificationAccessor::from_json_str(PETSTORE).unwrap();
    MockService::new(&spec, &MimicConfig::default()).unwrap()
}

fn json_body(response: &http::Response<bytes::Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[test]
fn test_endpoints_are_routed() {
    let service = service();
    assert_eq!(service.endpoint_count(), 4);
}

#[test]
fn test_parse_problems_are_reported() {
    let service = service();
    let paths: Vec<&str> = service.problems().iter().map(|p| p.path.as_str()).collect();

    assert_eq!(service.problems().len(), 2);
    assert!(paths.contains(&"#/paths/~1broken/get/responses/2000"));
    assert!(paths.contains(&"#/paths/~1broken/get/responses/200"));
}

#[test]
fn test_json_response_with_nested_references() {
    let service = service();
    let request = Request::get("/pets/1")
        .header(ACCEPT, "application/json")
        .header("x-mock-status", "200")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(json_body(&response), json!({"id": 7, "name": "Rex"}));
}

#[test]
fn test_array_items_resolve_against_document() {
    let service = service();
    let request = Request::get("/pets")
        .header("x-mock-status", "200")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(&response), json!([{"id": 7, "name": "Rex"}]));
}

#[test]
fn test_accept_quality_picks_xml() {
    let service = service();
    let request = Request::get("/pets/1")
        .header(ACCEPT, "application/json;q=0.5, application/xml")
        .header("x-mock-status", "200")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.headers()[CONTENT_TYPE], "application/xml");
    assert_eq!(response.body().as_ref(), b"<pet/>");
}

#[test]
fn test_unacceptable_media_type_is_406() {
    let service = service();
    let request = Request::get("/pets/1")
        .header(ACCEPT, "text/csv")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    assert_eq!(response.body().as_ref(), b"Unsupported media type");
}

#[test]
fn test_status_header_selects_response() {
    let service = service();
    let request = Request::get("/pets/1")
        .header("x-mock-status", "404")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(&response), json!({"code": 500, "message": "boom"}));
}

#[test]
fn test_undocumented_status_falls_back_to_default() {
    let service = service();
    let request = Request::get("/pets")
        .header("x-mock-status", "418")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(&response), json!({"code": 500, "message": "boom"}));
}

#[test]
fn test_no_default_and_no_header_is_invalid_status() {
    let service = service();
    let request = Request::get("/pets/1").body(()).unwrap();

    let err = service.handle(&request).unwrap_err();
    assert!(matches!(err, MockError::InvalidNegotiatedStatus { .. }));

    let response = service.respond(&request);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_first_success_fallback_when_enabled() {
    let spec = SpecificationAccessor::from_json_str(PETSTORE).unwrap();
    let mut config = MimicConfig::default();
    config.negotiation.fallback_to_first_success = true;

    let service = MockService::new(&spec, &config).unwrap();
    let request = Request::get("/pets/1").body(()).unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_contentless_response_is_406() {
    let service = service();
    let request = Request::delete("/pets/1").body(()).unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[test]
fn test_custom_status_header_and_default_status() {
    let spec = SpecificationAccessor::from_json_str(PETSTORE).unwrap();
    let config = ConfigLoader::new()
        .with_string(
            "[negotiation]\nstatus_header = \"prefer\"\ndefault_response_status = 500",
            "toml",
        )
        .unwrap()
        .load()
        .unwrap();

    let service = MockService::new(&spec, &config).unwrap();

    let request = Request::get("/pets").body(()).unwrap();
    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let request = Request::get("/pets/1")
        .header("prefer", "404")
        .body(())
        .unwrap();
    assert_eq!(service.handle(&request).unwrap().status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_unknown_endpoint() {
    let service = service();
    let request = Request::post("/pets").body(()).unwrap();

    let err = service.handle(&request).unwrap_err();
    assert!(matches!(err, MockError::EndpointNotFound { .. }));
}

#[test]
fn test_from_config_loads_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        r#"
paths:
  /health:
    get:
      responses:
        default:
          description: healthy
          content:
            text/plain:
              schema:
                type: string
                example: ok
"#
    )
    .unwrap();

    let mut config = MimicConfig::default();
    config.specification.path = file.path().to_path_buf();

    let service = MockService::from_config(&config).unwrap();
    let request = Request::get("/health").body(()).unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"ok");
}

#[test]
fn test_from_config_missing_file() {
    let mut config = MimicConfig::default();
    config.specification.path = "/nonexistent/openapi.yaml".into();

    assert!(matches!(
        MockService::from_config(&config),
        Err(ServiceError::Spec(_))
    ));
}

#[test]
fn test_parsed_collection_drives_generator() {
    let spec = SpecificationAccessor::new(json!({
        "responses": {
            "200": {"content": {"application/json": {"schema": {"type": "string", "example": "A"}}}},
            "default": {"content": {}}
        }
    }));
    let pointer = SpecificationPointer::parse("#/responses").unwrap();

    let parsed = ResponseCollectionParser::new()
        .parse_pointed_schema(&spec, &pointer)
        .unwrap();
    assert!(parsed.is_clean());

    let keys: Vec<StatusKey> = parsed.value.keys().collect();
    assert_eq!(keys, vec![StatusKey::Code(200), StatusKey::Default]);

    let parameters = MockParameters::from_responses(parsed.value);
    let generator = MockResponseGenerator::default();

    let request = MockRequest::new()
        .with_accept("application/json")
        .with_preferred_status(StatusKey::Code(200));
    let response = generator.generate_response(&request, &parameters).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(json_body(&response), json!("A"));

    let request = MockRequest::new().with_accept("text/plain");
    let response = generator.generate_response(&request, &parameters).unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(response.body().as_ref(), b"Unsupported media type");
}

const MIXED_CONTENT: &str = r#"{
    "paths": {
        "/reports/{id}": {
            "get": {
                "responses": {
                    "200": {
                        "content": {"application/json": {"schema": {"example": {"id": 1}}}}
                    },
                    "default": {
                        "content": {"text/plain": {"schema": {"example": "report unavailable"}}}
                    }
                }
            }
        }
    }
}"#;

fn mixed_content_service() -> MockService {
    let spec = SpecificationAccessor::from_json_str(MIXED_CONTENT).unwrap();
    MockService::new(&spec, &MimicConfig::default()).unwrap()
}

#[test]
fn test_mixed_content_wildcard_serves_default_response() {
    let service = mixed_content_service();
    let request = Request::get("/reports/1")
        .header(ACCEPT, "*/*")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(response.body().as_ref(), b"report unavailable");
}

#[test]
fn test_mixed_content_listed_types_serve_default_response() {
    let service = mixed_content_service();
    let request = Request::get("/reports/1")
        .header(ACCEPT, "application/json, text/plain")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
}

#[test]
fn test_mixed_content_status_header_keeps_its_media_type() {
    let service = mixed_content_service();
    let request = Request::get("/reports/1")
        .header(ACCEPT, "*/*")
        .header("x-mock-status", "200")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(json_body(&response), json!({"id": 1}));
}

#[test]
fn test_mixed_content_only_other_response_type_is_406() {
    let service = mixed_content_service();
    let request = Request::get("/reports/1")
        .header(ACCEPT, "application/json")
        .body(())
        .unwrap();

    let response = service.handle(&request).unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(response.body().as_ref(), b"Unsupported media type");
}
