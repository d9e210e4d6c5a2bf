//! HTTP transport with tracing and the backend's fixed request headers.
//!
//! Every request is a POST carrying `Content-type: application/json;
//! charset=utf-8` and `Connection: close`. No timeout is applied unless one
//! is configured explicitly, so a hung backend stalls the caller.

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{CONNECTION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::TransportError;
use crate::transport::Transport;

/// Content type of every request body.
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// User agent string for WDC Bridge.
const USER_AGENT: &str = concat!("wdcbridge/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Transport
// ============================================================================

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport for the backend rooted at `base_url`, with no
    /// request timeout.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::builder(base_url).build()
    }

    /// Creates a builder for customizing the transport.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// Returns the backend root URL (always ending in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, endpoint: Endpoint) -> Result<Url, TransportError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| TransportError::aborted(format!("Invalid endpoint URL: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    async fn post(&self, endpoint: Endpoint, body: String) -> Result<Value, TransportError> {
        if endpoint.is_navigation() {
            return Err(TransportError::aborted(format!(
                "{endpoint} is reached by navigation, not by request"
            )));
        }

        let url = self.url_for(endpoint)?;
        debug!(url = %url, len = body.len(), "POST request");

        let response = self.inner.post(url).body(body).send().await?;
        let status = response.status();
        debug!(status = %status, "Response received");

        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "Backend returned an error status");
            return Err(TransportError::http_status(
                status.as_u16(),
                status.canonical_reason(),
                text,
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Failed to decode response body");
            TransportError::parse(Some(status.as_u16()), e.to_string())
        })
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        self.url_for(endpoint)
            .map_or_else(|_| endpoint.to_string(), String::from)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Creates a builder for the given backend root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Applies a request timeout. Without one, requests never time out.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Applies an optional request timeout.
    pub fn maybe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        headers
    }

    /// Builds the transport.
    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let mut base_url = Url::parse(&self.base_url)
            .map_err(|e| TransportError::aborted(format!("Invalid base URL: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(TransportError::aborted(format!(
                "Invalid base URL: {} cannot be a base",
                self.base_url
            )));
        }

        // Endpoint paths are joined relative to the root, so it must be a
        // directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder()
            .default_headers(Self::default_headers())
            .user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTransport {
            inner: builder.build()?,
            base_url,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
