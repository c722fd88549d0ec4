//! Page transport.
//!
//! The engine only needs "GET this URL, give me status, change token and
//! body"; [`Fetcher`] is that seam, [`HttpFetcher`] the real implementation
//! and `testing::MockFetcher` the canned one.

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code (always 2xx for responses returned by a fetcher).
    pub status: u16,
    /// Cache validator (`ETag`) if the server sent one.
    pub etag: Option<String>,
    /// Decoded body.
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            etag: None,
            body: body.into(),
        }
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }
}

/// Errors that can occur while fetching a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Request failed: {0}")]
    Request(String),
}

/// Trait for page transports.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &str;

    /// GET `url`. Non-success statuses are returned as
    /// [`FetchError::Status`].
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}
