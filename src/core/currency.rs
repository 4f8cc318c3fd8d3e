//! Currency conversion abstractions

use crate::core::error::Result;
use crate::core::rates::ResolvedDayRates;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Point-in-time conversion backed by a daily reference rate series.
///
/// Operations take `&mut self` because a lookup may refresh the cached feed.
/// Share one instance across tasks only behind external synchronization.
#[async_trait]
pub trait ReferenceRateProvider: Send {
    /// Converts `amount` of `source` into `target` using the rates of `date`.
    ///
    /// A negative or non-finite `amount` is rejected before any fetch. When
    /// the source rate rounds to zero at the client precision the result is
    /// infinite.
    async fn convert(
        &mut self,
        amount: f64,
        source: &str,
        target: &str,
        date: NaiveDate,
    ) -> Result<f64>;

    /// Rates published for `date`, rounded to the client precision.
    async fn fetch_day(&mut self, date: NaiveDate) -> Result<ResolvedDayRates>;

    /// Rates for every published day.
    async fn fetch_all(&mut self) -> Result<BTreeMap<NaiveDate, ResolvedDayRates>>;
}
