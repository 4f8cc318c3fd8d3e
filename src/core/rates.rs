//! Parsed and rounded exchange rates.

use crate::core::error::{RateError, Result};
use crate::core::feed::RawRateEntry;
use crate::core::rounding::to_fixed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A currency paired with its rate relative to the reference currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    pub currency: String,
    pub rate: f64,
}

impl ResolvedRate {
    pub fn new(currency: &str, rate: f64) -> Self {
        Self {
            currency: currency.to_string(),
            rate,
        }
    }

    /// Parses a raw feed entry. Rounding is left to the caller.
    pub fn parse(raw: &RawRateEntry) -> Result<Self> {
        let malformed = || RateError::MalformedRate {
            currency: raw.currency.clone(),
            raw: raw.rate.clone(),
        };
        let rate: f64 = raw.rate.trim().parse().map_err(|_| malformed())?;
        if !rate.is_finite() {
            return Err(malformed());
        }
        Ok(Self::new(&raw.currency, rate))
    }
}

/// Returns a copy of `rate` rounded to `precision` fractional digits.
pub fn rounded_rate(rate: &ResolvedRate, precision: i32) -> ResolvedRate {
    ResolvedRate {
        currency: rate.currency.clone(),
        rate: to_fixed(rate.rate, precision),
    }
}

/// All resolved rates for one day, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDayRates {
    rates: Vec<ResolvedRate>,
}

impl ResolvedDayRates {
    pub fn new(rates: Vec<ResolvedRate>) -> Self {
        Self { rates }
    }

    /// Parses and rounds every entry of a raw day. The first malformed entry
    /// fails the whole day.
    pub fn from_raw(entries: &[RawRateEntry], precision: i32) -> Result<Self> {
        let rates = entries
            .iter()
            .map(|entry| ResolvedRate::parse(entry).map(|rate| rounded_rate(&rate, precision)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rates })
    }

    pub fn get(&self, currency: &str) -> Option<&ResolvedRate> {
        self.rates.iter().find(|r| r.currency == currency)
    }

    pub fn currencies(&self) -> Vec<String> {
        self.rates.iter().map(|r| r.currency.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedRate> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currency code to rate lookup table.
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.rates
            .iter()
            .map(|r| (r.currency.clone(), r.rate))
            .collect()
    }
}

impl IntoIterator for ResolvedDayRates {
    type Item = ResolvedRate;
    type IntoIter = std::vec::IntoIter<ResolvedRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedDayRates {
    type Item = &'a ResolvedRate;
    type IntoIter = std::slice::Iter<'a, ResolvedRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(currency: &str, rate: &str) -> RawRateEntry {
        RawRateEntry {
            currency: currency.to_string(),
            rate: rate.to_string(),
        }
    }

    #[test]
    fn test_from_raw_rounds_each_rate() {
        let day = ResolvedDayRates::from_raw(
            &[raw("USD", "1.003123142"), raw("XYZ", "2.00001999")],
            4,
        )
        .unwrap();
        assert_eq!(
            day,
            ResolvedDayRates::new(vec![
                ResolvedRate::new("USD", 1.0031),
                ResolvedRate::new("XYZ", 2.0),
            ])
        );
    }

    #[test]
    fn test_malformed_rate_fails_whole_day() {
        let result = ResolvedDayRates::from_raw(&[raw("USD", "1.0"), raw("PLN", "4,32")], 4);
        match result {
            Err(RateError::MalformedRate { currency, raw }) => {
                assert_eq!(currency, "PLN");
                assert_eq!(raw, "4,32");
            }
            other => panic!("Expected MalformedRate, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rate_is_malformed() {
        assert!(ResolvedRate::parse(&raw("USD", "NaN")).is_err());
        assert!(ResolvedRate::parse(&raw("USD", "inf")).is_err());
    }

    #[test]
    fn test_rounded_rate_leaves_input_untouched() {
        let rate = ResolvedRate::new("USD", 1.23456);
        let rounded = rounded_rate(&rate, 2);
        assert_eq!(rounded.rate, 1.23);
        assert_eq!(rate.rate, 1.23456);
    }

    #[test]
    fn test_lookup_helpers() {
        let day = ResolvedDayRates::new(vec![
            ResolvedRate::new("USD", 1.002),
            ResolvedRate::new("CHF", 1.03),
        ]);
        assert_eq!(day.get("CHF").map(|r| r.rate), Some(1.03));
        assert!(day.get("chf").is_none());
        assert_eq!(day.currencies(), vec!["USD", "CHF"]);
        assert_eq!(day.to_map().get("USD"), Some(&1.002));
        assert_eq!(day.len(), 2);
    }
}
