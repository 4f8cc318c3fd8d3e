//! Rate client: keeps the fetched feed in memory and answers conversions from it.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::config::{ClientConfig, REFERENCE_RATE};
use crate::core::error::{RateError, Result};
use crate::core::feed::{FEED_DATE_FORMAT, FeedDocument};
use crate::core::rounding::{precision_digits, to_fixed};
use crate::core::{FeedSource, ReferenceRateProvider, ResolvedDayRates, ResolvedRate};
use crate::providers::EcbFeedSource;

/// Last successfully fetched document and when it arrived.
struct CachedFeed {
    document: FeedDocument,
    fetched_at: Instant,
}

impl CachedFeed {
    fn is_fresh(&self, ttl: Duration) -> bool {
        !ttl.is_zero() && self.fetched_at.elapsed() < ttl
    }
}

/// Reference rate client that caches the fetched feed in memory.
///
/// The feed is fetched lazily on the first lookup and reused until the TTL
/// runs out. A zero TTL fetches on every call. Operations take `&mut self`,
/// so sharing one client across tasks needs an external lock.
pub struct XrefClient<S: FeedSource = EcbFeedSource> {
    source: S,
    cache: Option<CachedFeed>,
    ttl: Duration,
    precision: u32,
    reference_currency: String,
}

impl XrefClient<EcbFeedSource> {
    /// Client reading the published ECB feed.
    ///
    /// `precision` is the number of fractional digits kept for rates and
    /// results. `ttl_seconds` is how long a fetched feed is reused; zero
    /// fetches on every call.
    pub fn new(precision: u32, ttl_seconds: u64) -> Self {
        Self::from_config(ClientConfig::new(precision, ttl_seconds))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let source = EcbFeedSource::from_config(&config);
        Self::with_source(source, config)
    }
}

impl<S: FeedSource> XrefClient<S> {
    pub fn with_source(source: S, config: ClientConfig) -> Self {
        XrefClient {
            source,
            cache: None,
            ttl: Duration::from_secs(config.ttl_seconds),
            precision: config.precision,
            reference_currency: config.reference_currency,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached document, fetching a new one first if the cache is
    /// empty or stale. A failed fetch keeps whatever was cached before.
    async fn ensure_fresh(&mut self) -> Result<&FeedDocument> {
        let ttl = self.ttl;
        if self.cache.as_ref().is_some_and(|cached| cached.is_fresh(ttl)) {
            debug!("Cache HIT for reference rate feed");
        } else {
            debug!("Cache MISS for reference rate feed");
            let document = Self::download(&self.source).await?;
            self.cache = Some(CachedFeed {
                document,
                fetched_at: Instant::now(),
            });
        }

        match &self.cache {
            Some(cached) => Ok(&cached.document),
            None => Err(RateError::FetchFailed {
                url: self.source.location().to_string(),
                cause: anyhow!("No reference rate feed cached"),
            }),
        }
    }

    async fn download(source: &S) -> Result<FeedDocument> {
        let fetch_failed = |cause| RateError::FetchFailed {
            url: source.location().to_string(),
            cause,
        };
        let body = source.fetch_document().await.map_err(fetch_failed)?;
        let document = FeedDocument::from_xml(&body).map_err(fetch_failed)?;
        debug!(days = document.days.len(), "Fetched reference rate feed");
        Ok(document)
    }

    /// Resolves both legs of a conversion. The reference currency never
    /// appears in the feed and always resolves to its fixed rate.
    fn resolve_pair(
        &self,
        day: &ResolvedDayRates,
        source: &str,
        target: &str,
        date: NaiveDate,
    ) -> Result<(ResolvedRate, ResolvedRate)> {
        let resolve = |code: &str| {
            if code == self.reference_currency {
                Some(ResolvedRate::new(code, REFERENCE_RATE))
            } else {
                day.get(code).cloned()
            }
        };
        match (resolve(source), resolve(target)) {
            (Some(from), Some(to)) => Ok((from, to)),
            _ => Err(RateError::UnknownCurrency {
                from: source.to_string(),
                to: target.to_string(),
                date,
                available: day.currencies(),
            }),
        }
    }
}

/// Resolves the rates of one day of the document.
fn resolve_day(
    document: &FeedDocument,
    date: NaiveDate,
    precision: i32,
) -> Result<ResolvedDayRates> {
    let time_key = date.format(FEED_DATE_FORMAT).to_string();
    let day = document
        .day(&time_key)
        .filter(|day| !day.rates.is_empty())
        .ok_or(RateError::DateNotFound { date })?;
    ResolvedDayRates::from_raw(&day.rates, precision)
}

/// Converts `amount` between two resolved legs.
///
/// All rates are quoted against the reference currency, so the cross rate is
/// `to / from`. The amount is rounded to 2 digits and the cross rate to
/// `precision` before multiplying, and the product is rounded again.
///
/// A source rate that rounds to zero at a low precision gives an infinite
/// result.
fn compute_exchange_value(
    amount: f64,
    from: &ResolvedRate,
    to: &ResolvedRate,
    precision: i32,
) -> f64 {
    if from.currency == to.currency {
        return to_fixed(amount, precision);
    }
    let cross_rate = to_fixed(to.rate / from.rate, precision);
    to_fixed(to_fixed(amount, 2) * cross_rate, precision)
}

#[async_trait]
impl<S: FeedSource> ReferenceRateProvider for XrefClient<S> {
    #[instrument(skip(self))]
    async fn convert(
        &mut self,
        amount: f64,
        source: &str,
        target: &str,
        date: NaiveDate,
    ) -> Result<f64> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(RateError::InvalidAmount { amount });
        }
        let day = self.fetch_day(date).await?;
        let (from, to) = self.resolve_pair(&day, source, target, date)?;
        let result = compute_exchange_value(amount, &from, &to, precision_digits(self.precision));
        debug!(result, "Converted amount");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn fetch_day(&mut self, date: NaiveDate) -> Result<ResolvedDayRates> {
        let precision = precision_digits(self.precision);
        let document = self.ensure_fresh().await?;
        resolve_day(document, date, precision)
    }

    #[instrument(skip(self))]
    async fn fetch_all(&mut self) -> Result<BTreeMap<NaiveDate, ResolvedDayRates>> {
        let precision = precision_digits(self.precision);
        let document = self.ensure_fresh().await?;

        let mut all_rates = BTreeMap::new();
        for day in &document.days {
            let date = NaiveDate::parse_from_str(&day.time, FEED_DATE_FORMAT).map_err(|_| {
                RateError::MalformedDate {
                    raw: day.time.clone(),
                }
            })?;
            if day.rates.is_empty() {
                debug!(%date, "Skipping day without rates");
                continue;
            }
            let rates = ResolvedDayRates::from_raw(&day.rates, precision)?;
            all_rates.entry(date).or_insert(rates);
        }
        Ok(all_rates)
    }
}
