//! Integration tests using WireMock
//!
//! These tests run the client against a mock Graph API server and cover the
//! full request/response cycle: URL building, token placement, body encoding,
//! decoding and error classification.

mod albums;
mod errors;
mod upload;
mod users;

use integrations_facebook::{FacebookClient, FacebookConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Creates a client pointed at the mock server.
pub fn client_for(server: &MockServer) -> FacebookClient {
    let config = FacebookConfig::builder()
        .access_token(TEST_TOKEN)
        .api_version("v2.11")
        .base_url(server.uri())
        .build()
        .unwrap();
    FacebookClient::new(config).unwrap()
}

/// Mock builder that expects the access token in the query string.
pub fn mock_with_token(http_method: &str, api_path: &str) -> wiremock::MockBuilder {
    Mock::given(method(http_method))
        .and(path(api_path))
        .and(query_param("access_token", TEST_TOKEN))
}

/// Success response with a JSON body.
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Error response with a JSON body.
pub fn error_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}
