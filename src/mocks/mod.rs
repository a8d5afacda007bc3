//! Test doubles.

use crate::errors::TransportError;
use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartBody, RequestBody,
};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use url::Url;

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderMap,
    /// Form body bytes; empty for other bodies.
    pub body: Bytes,
    /// Multipart content, captured before it becomes a `reqwest` form.
    pub multipart: Option<MultipartBody>,
}

/// Transport that records requests and replays queued responses.
///
/// With nothing queued, `send` fails with a connect error.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, body.to_string());
    }

    pub fn push_raw(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap();
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, HeaderMap::new(), Bytes::from(body.into())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            body: request.body.form_bytes(),
            multipart: match &request.body {
                RequestBody::Multipart(m) => Some(m.clone()),
                _ => None,
            },
            url: request.url,
            headers: request.headers,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Connect("connection refused".to_string()))
    }
}
