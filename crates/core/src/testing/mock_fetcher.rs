//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::fetcher::{FetchError, FetchResponse, Fetcher};

/// Mock implementation of the Fetcher trait.
///
/// Provides controllable behavior for testing:
/// - Return canned responses or errors per URL
/// - Track requested URLs for assertions
/// - Simulate latency and observe how many fetches overlap
///
/// Unknown URLs answer with HTTP 404.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Result<FetchResponse, FetchError>>>,
    requests: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response` from now on.
    pub fn respond(&self, url: &str, response: FetchResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(response));
    }

    /// Fail every fetch of `url` with `error`.
    pub fn fail(&self, url: &str, error: FetchError) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
    }

    /// Sleep this long inside every fetch.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// URLs fetched so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of fetches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Status {
                    status: 404,
                    url: url.to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_response_and_recording() {
        let fetcher = MockFetcher::new();
        fetcher.respond("https://a.test/", FetchResponse::ok("<p>a</p>").with_etag("\"1\""));

        let response = fetcher.fetch("https://a.test/").await.unwrap();

        assert_eq!(response.body, "<p>a</p>");
        assert_eq!(response.etag.as_deref(), Some("\"1\""));
        assert_eq!(fetcher.requests(), vec!["https://a.test/".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_url_is_404() {
        let fetcher = MockFetcher::new();
        let err = fetcher.fetch("https://missing.test/").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let fetcher = MockFetcher::new();
        fetcher.fail("https://a.test/", FetchError::ConnectionFailed("refused".to_string()));
        assert!(fetcher.fetch("https://a.test/").await.is_err());
    }
}
