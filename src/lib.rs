//! Currency conversion based on the European Central Bank reference rates for
//! the last 90 days. All published rates are quoted against the euro.

pub mod client;
pub mod config;
pub mod core;
pub mod providers;

pub use crate::client::XrefClient;
pub use crate::config::ClientConfig;
pub use crate::core::{RateError, ReferenceRateProvider, ResolvedDayRates, ResolvedRate};

/// Creates a client for the published ECB feed.
///
/// `precision` sets the fractional digits kept for rates and results (values
/// below 1 behave as 1). `ttl_seconds` is how long a fetched feed is reused
/// before the next lookup fetches it again; zero fetches on every call.
pub fn new(precision: u32, ttl_seconds: u64) -> impl ReferenceRateProvider {
    XrefClient::new(precision, ttl_seconds)
}
