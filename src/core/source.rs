//! Transport abstraction for the raw rate feed.

use anyhow::Result;
use async_trait::async_trait;

/// Fetches the raw feed document body.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_document(&self) -> Result<String>;

    /// Location reported in fetch errors.
    fn location(&self) -> &str;
}
