use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::{ClientConfig, ECB_FEED_URL};
use crate::core::FeedSource;

// EcbFeedSource implementation for FeedSource
pub struct EcbFeedSource {
    url: String,
    user_agent: String,
}

impl EcbFeedSource {
    pub fn new(url: &str) -> Self {
        Self::from_config(&ClientConfig::default().with_feed_url(url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        EcbFeedSource {
            url: config.feed_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for EcbFeedSource {
    fn default() -> Self {
        Self::new(ECB_FEED_URL)
    }
}

#[async_trait]
impl FeedSource for EcbFeedSource {
    #[instrument(name = "EcbFeedFetch", skip(self), fields(url = %self.url))]
    async fn fetch_document(&self) -> Result<String> {
        debug!("Requesting reference rates from {}", self.url);

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()?;
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(anyhow!("Received empty response"));
        }

        debug!(bytes = text.len(), "Received reference rate document");
        Ok(text)
    }

    fn location(&self) -> &str {
        &self.url
    }
}
