use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

/// Published 90 day history of euro reference rates.
pub const ECB_FEED_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist-90d.xml";

/// Currency all feed rates are quoted against.
pub const REFERENCE_CURRENCY: &str = "EUR";

/// Rate of the reference currency against itself.
pub const REFERENCE_RATE: f64 = 1.0;

fn default_precision() -> u32 {
    4
}

fn default_feed_url() -> String {
    ECB_FEED_URL.to_string()
}

fn default_reference_currency() -> String {
    REFERENCE_CURRENCY.to_string()
}

fn default_user_agent() -> String {
    concat!("euroxref/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Fractional digits kept for rates and conversion results.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Seconds a fetched feed stays fresh. Zero refetches on every call.
    #[serde(default)]
    pub ttl_seconds: u64,
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            precision: default_precision(),
            ttl_seconds: 0,
            feed_url: default_feed_url(),
            reference_currency: default_reference_currency(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new(precision: u32, ttl_seconds: u64) -> Self {
        ClientConfig {
            precision,
            ttl_seconds,
            ..Default::default()
        }
    }

    pub fn with_feed_url(mut self, feed_url: &str) -> Self {
        self.feed_url = feed_url.to_string();
        self
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
