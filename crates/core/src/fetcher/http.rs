//! reqwest-backed fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ETAG;
use reqwest::Client;
use tracing::debug;

use super::{FetchError, FetchResponse, Fetcher};
use crate::config::SyncConfig;

/// Fetches pages over HTTP with a fixed per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &SyncConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        debug!(url = url, "Fetching page");

        let response = self.client.get(url).send().await.map_err(|e| map_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| map_error(url, e))?;

        debug!(url = url, bytes = body.len(), etag = ?etag, "Fetched page");

        Ok(FetchResponse {
            status: status.as_u16(),
            etag,
            body,
        })
    }
}

fn map_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if e.is_connect() {
        FetchError::ConnectionFailed(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}
