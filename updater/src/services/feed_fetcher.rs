use anyhow::Result;
use async_trait::async_trait;
use shared::RateError;
use std::time::Duration;
use tracing::{debug, info};

/// Source of the raw rate feed document.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<String, RateError>;
}

/// Fetches the feed with a single HTTP GET, no retries.
pub struct HttpFeedFetcher {
    url: String,
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rates-updater/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeedFetcher {
    async fn fetch(&self) -> Result<String, RateError> {
        debug!("Requesting rate feed from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| RateError::Network(format!("GET {} failed: {}", self.url, e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| RateError::Network(format!("reading {} failed: {}", self.url, e)))?;

        info!("Fetched rate feed from {} ({} bytes)", self.url, text.len());
        Ok(text)
    }
}
