//! HTTP transport layer for the Graph API.

use crate::config::FacebookConfig;
use crate::errors::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{header::HeaderMap, Client, Method, StatusCode};
use std::fmt;
use url::Url;

/// HTTP transport abstraction for testability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and receive a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP request representation.
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL, including the query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: RequestBody,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET method.
    Get,
    /// POST method.
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// Request body variants.
#[derive(Clone)]
pub enum RequestBody {
    /// Empty body.
    Empty,
    /// URL-encoded form body.
    Form(Bytes),
    /// Multipart form body, turned into a `reqwest` form when sent.
    Multipart(MultipartBody),
}

impl RequestBody {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::Form(_) => "form",
            RequestBody::Multipart(_) => "multipart",
        }
    }

    /// Encoded form bytes; empty for other bodies.
    pub fn form_bytes(&self) -> Bytes {
        match self {
            RequestBody::Form(bytes) => bytes.clone(),
            _ => Bytes::new(),
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "Empty"),
            RequestBody::Form(bytes) => write!(f, "Form({} bytes)", bytes.len()),
            RequestBody::Multipart(m) => write!(
                f,
                "Multipart({} files, {} fields)",
                m.files.len(),
                m.fields.len()
            ),
        }
    }
}

/// File field of a multipart body.
#[derive(Clone)]
pub struct FilePart {
    /// Form field name.
    pub field_name: String,
    /// File name reported in the part header.
    pub file_name: String,
    /// Part content.
    pub data: Bytes,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("len", &self.data.len())
            .finish()
    }
}

/// `multipart/form-data` content: file fields first, then text fields.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    /// File fields, in order.
    pub files: Vec<FilePart>,
    /// Text fields, in order.
    pub fields: Vec<(String, String)>,
}

impl MultipartBody {
    /// Builds the `reqwest` form. File parts keep their order ahead of the
    /// text fields.
    pub fn into_form(self) -> Result<Form, TransportError> {
        let mut form = Form::new();

        for file in self.files {
            let part = Part::bytes(file.data.to_vec())
                .file_name(file.file_name)
                .mime_str(mime::APPLICATION_OCTET_STREAM.as_ref())
                .map_err(|e| TransportError::Request(e.to_string()))?;
            form = form.part(file.field_name, part);
        }

        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        Ok(form)
    }
}

/// HTTP response representation.
#[derive(Debug)]
pub struct HttpResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Reqwest-based HTTP transport implementation.
///
/// Holds a single pooled client that is reused for every request.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new reqwest transport around an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a transport configured from the client configuration.
    pub fn from_config(config: &FacebookConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method: Method = request.method.into();
        let mut req = self.client.request(method, request.url);

        // Add headers
        req = req.headers(request.headers);

        // Add body
        match request.body {
            RequestBody::Empty => {}
            RequestBody::Form(bytes) => {
                req = req.body(bytes);
            }
            RequestBody::Multipart(multipart) => {
                req = req.multipart(multipart.into_form()?);
            }
        }

        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, headers, body))
    }
}
