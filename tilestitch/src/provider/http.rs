//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Transport-level failure: the request never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request failed before a response arrived (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("Failed to read response: {0}")]
    Body(String),
}

/// Status and body of a completed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Async trait for HTTP client operations.
///
/// Unlike a typical client wrapper this does not treat non-2xx statuses as
/// errors; the caller decides what a usable response is.
pub trait AsyncHttpClient: Send + Sync + 'static {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The status code and response body, or a transport error.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Async HTTP client implementation using reqwest.
///
/// Connection pooling is handled by the inner client; clone-free sharing is
/// done by wrapping the whole client in an `Arc`.
#[derive(Debug, Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new client with the given per-request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            debug!(url = %url, error = %e, "HTTP request failed");
            TransportError::Request(e.to_string())
        })?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
