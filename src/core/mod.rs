//! Core business logic abstractions

pub mod currency;
pub mod error;
pub mod feed;
pub mod rates;
pub mod rounding;
pub mod source;

// Re-export main types for cleaner imports
pub use currency::ReferenceRateProvider;
pub use error::RateError;
pub use feed::{FeedDocument, RawDayEntry, RawRateEntry};
pub use rates::{ResolvedDayRates, ResolvedRate, rounded_rate};
pub use rounding::to_fixed;
pub use source::FeedSource;
