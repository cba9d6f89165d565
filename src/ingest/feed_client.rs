//! HTTP client for the upstream GeoJSON feed.

use std::time::Duration;

use super::IngestError;

/// Fetches the feed document from a fixed URL.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Builds a client whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Fetch`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quake-feed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Feed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the feed body exactly as served.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Fetch`] on network failure, timeout or a
    /// non-success status.
    pub async fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
