//! HTTP transport seam for the A2A client.
//!
//! The client and the card resolver only talk to [`HttpTransport`]. The
//! default implementation, [`ReqwestTransport`], wraps a `reqwest::Client`;
//! tests and embedders can plug in their own to script responses chunk by
//! chunk.
//!
//! A transport must classify its own faults: anything that prevents a
//! response from arriving is reported as [`A2AError::network`], and anything
//! that breaks the body afterwards as [`A2AError::stream`].

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{Stream, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use crate::error::{A2AError, A2AResult, ConfigError};

/// A response body delivered as a sequence of byte chunks of arbitrary size.
pub type ByteStream = Pin<Box<dyn Stream<Item = A2AResult<Bytes>> + Send>>;

/// One outbound HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A GET request with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A POST request carrying `body`.
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Some(body),
        }
    }
}

/// The status and body of an HTTP response. The body is not read until
/// polled.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body chunks.
    pub body: ByteStream,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl HttpResponse {
    /// Build a response from a status and a body stream.
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self { status, body }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> A2AResult<Vec<u8>> {
        self.body
            .try_fold(Vec::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok(acc)
            })
            .await
    }

    /// Convert a non-success response into an [`A2AError::Http`].
    ///
    /// The reason is the body text, or the canonical status reason when the
    /// body is empty or unreadable.
    pub async fn into_http_error(self) -> A2AError {
        let status = self.status;
        let body = self
            .bytes()
            .await
            .map(|b| String::from_utf8_lossy(&b).trim().to_string())
            .unwrap_or_default();
        let reason = if body.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown Status")
                .to_string()
        } else {
            body
        };
        A2AError::http(status, reason)
    }
}

/// Transport abstraction for A2A communication.
///
/// Implementations perform a single HTTP exchange. They never retry and never
/// apply their own deadline unless configured to by the embedder.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute `request`, returning as soon as the status line is available.
    async fn execute(&self, request: HttpRequest) -> A2AResult<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with an existing `reqwest::Client`.
    ///
    /// Useful to share a connection pool, configure TLS, or set a deadline.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> A2AResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(A2AError::network)?;
        let status = response.status().as_u16();
        let body = response.bytes_stream().map_err(A2AError::stream).boxed();

        Ok(HttpResponse::new(status, body))
    }
}

/// Extra headers applied to outgoing requests.
///
/// Protocol defaults (`Accept`, `Content-Type`) are applied after these, so
/// callers can add headers but cannot drop the defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers to merge into each request.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// No extra headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header (builder-style).
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        self.try_insert(name, value)?;
        Ok(self)
    }

    pub(crate) fn try_insert(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    /// Build the header map for one request: caller headers first, then the
    /// protocol defaults on top.
    pub(crate) fn merged_with(&self, defaults: &[(HeaderName, &'static str)]) -> HeaderMap {
        let mut headers = self.headers.clone();
        for (name, value) in defaults {
            headers.insert(name.clone(), HeaderValue::from_static(value));
        }
        headers
    }
}
