//! Request executor: URL building, auth, body encoding and response decoding.

use crate::auth::ACCESS_TOKEN_PARAM;
use crate::config::FacebookConfig;
use crate::errors::{ApiError, DecodeError, FacebookError, FacebookResult, UploadError};
use crate::observability::redact_url;
use crate::params::{encode_form, encode_multipart, encode_query, BinaryPart, Params};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Request executor that turns a method, path, parameters and optional binary
/// parts into exactly one network round trip.
///
/// It holds only read-only configuration and a pooled transport, so one
/// executor can serve concurrent callers without locking. It never retries.
pub struct RequestExecutor {
    /// Configuration
    config: FacebookConfig,
    /// HTTP transport
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(config: FacebookConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Executes a request and decodes a successful JSON response into `T`.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - API path, relative to `<base>/<version>/`
    /// * `params` - Scalar parameters
    /// * `parts` - Binary parts; only allowed with POST
    ///
    /// # Errors
    ///
    /// * `Transport` when no response was received
    /// * `Api` when the server returned a structured error
    /// * `Status` when a non-success body was not a structured error
    /// * `Decode` when a success body does not match `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        parts: Vec<BinaryPart>,
    ) -> FacebookResult<T> {
        let response = self.execute_raw(method, path, params, parts).await?;

        serde_json::from_slice(&response.body)
            .map_err(|e| FacebookError::Decode(DecodeError::from(e)))
    }

    /// Executes a request and returns the successful response undecoded.
    pub async fn execute_raw(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        parts: Vec<BinaryPart>,
    ) -> FacebookResult<HttpResponse> {
        let request = self.build_request(method, path, params, parts).await?;

        debug!(
            method = %request.method,
            url = %redact_url(&request.url),
            body = request.body.kind(),
            "Sending request"
        );

        let response = self.transport.send(request).await?;

        debug!(status = response.status.as_u16(), "Received response");

        if !matches!(response.status, StatusCode::OK | StatusCode::CREATED) {
            return Err(Self::handle_error_response(response));
        }

        Ok(response)
    }

    /// Builds the full request without sending it.
    ///
    /// The access token always goes in the query string. GET parameters join
    /// it there; POST parameters go in the body.
    pub async fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        parts: Vec<BinaryPart>,
    ) -> FacebookResult<HttpRequest> {
        let mut url = self.build_url(path)?;
        let mut headers = HeaderMap::new();

        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent)
                .map_err(|e| FacebookError::configuration(format!("Invalid user agent: {}", e)))?,
        );

        let token = self.config.credentials.expose_token();

        let body = match method {
            HttpMethod::Get => {
                if !parts.is_empty() {
                    return Err(UploadError::InvalidPart(
                        "binary parts require a POST request".to_string(),
                    )
                    .into());
                }
                let query = encode_query(&params.with(ACCESS_TOKEN_PARAM, token));
                url.set_query(Some(&query));
                RequestBody::Empty
            }
            HttpMethod::Post => {
                let query = encode_query(&Params::new().with(ACCESS_TOKEN_PARAM, token));
                url.set_query(Some(&query));

                if parts.is_empty() {
                    headers.insert(
                        CONTENT_TYPE,
                        HeaderValue::from_str(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
                            .map_err(|e| {
                                FacebookError::configuration(format!("Invalid content type: {}", e))
                            })?,
                    );
                    RequestBody::Form(encode_form(&params))
                } else {
                    // reqwest sets the multipart content type and boundary.
                    let multipart = encode_multipart(parts, &params).await?;
                    RequestBody::Multipart(multipart)
                }
            }
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Builds `<base>/<version>/<path>`.
    pub fn build_url(&self, path: &str) -> FacebookResult<Url> {
        let path = format!(
            "{}/{}",
            self.config.api_version(),
            path.trim_start_matches('/')
        );

        self.config
            .base_url
            .join(&path)
            .map_err(|e| FacebookError::configuration(format!("Invalid URL: {}", e)))
    }

    /// Gets the configuration.
    pub fn config(&self) -> &FacebookConfig {
        &self.config
    }

    /// Maps a non-success response to an error.
    ///
    /// A body of the form `{"error": {...}}` becomes an `Api` error; anything
    /// else becomes a `Status` error carrying only the status code.
    fn handle_error_response(response: HttpResponse) -> FacebookError {
        #[derive(Deserialize)]
        struct ErrorEnvelope {
            error: ApiError,
        }

        match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => {
                warn!(
                    status = response.status.as_u16(),
                    code = envelope.error.code,
                    subcode = envelope.error.error_subcode,
                    error_type = %envelope.error.error_type,
                    fbtrace_id = %envelope.error.fbtrace_id,
                    "API error response"
                );
                FacebookError::Api(envelope.error)
            }
            Err(_) => {
                warn!(status = response.status.as_u16(), "Unstructured error response");
                FacebookError::status(response.status)
            }
        }
    }
}
