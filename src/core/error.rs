//! Error taxonomy for reference rate lookups.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by [`ReferenceRateProvider`](crate::core::ReferenceRateProvider) operations.
///
/// Every failure is local to the call that produced it. A failed fetch leaves
/// previously cached data in place, so the client stays usable afterwards.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Failed to fetch reference rates from {url}: {cause:#}")]
    FetchFailed { url: String, cause: anyhow::Error },

    #[error(
        "Currency data for {date} doesn't exist. Records are only available for past 90 days, excluding present day."
    )]
    DateNotFound { date: NaiveDate },

    #[error(
        "Invalid currencies selected: {from}, {to}. List of available currency rates: {} for {date}",
        .available.join(", ")
    )]
    UnknownCurrency {
        from: String,
        to: String,
        date: NaiveDate,
        available: Vec<String>,
    },

    #[error("Invalid input rate value for {currency}, {raw}")]
    MalformedRate { currency: String, raw: String },

    #[error("Invalid date stamp in reference rate feed: {raw}")]
    MalformedDate { raw: String },

    #[error("Amount of conversion currency can't be negative: {amount}")]
    InvalidAmount { amount: f64 },
}

pub type Result<T> = std::result::Result<T, RateError>;
