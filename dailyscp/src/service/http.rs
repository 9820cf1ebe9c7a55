//! `reqwest`-backed [`PageFetcher`].

use async_trait::async_trait;
use tracing::debug;

use super::protocols::PageFetcher;
use crate::config::FetchConfig;
use crate::errors::{DailyScpError, Result};

/// Fetches pages over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout()?)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DailyScpError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DailyScpError::fetch(url, e))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Fetched");
        if !status.is_success() {
            return Err(DailyScpError::fetch(url, format!("HTTP {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| DailyScpError::fetch(url, e))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| DailyScpError::fetch(url, e))?;
        Ok(bytes.to_vec())
    }
}
