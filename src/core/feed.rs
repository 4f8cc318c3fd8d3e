//! Raw reference rate feed as published by the European Central Bank.
//!
//! The document nests `Cube` elements three deep: an outer wrapper, one
//! element per day carrying a `time` attribute, and one element per currency
//! carrying `currency` and `rate` attributes. Rates are kept as strings so a
//! single malformed value does not reject the whole document.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Date layout used by the feed for day stamps.
pub const FEED_DATE_FORMAT: &str = "%Y-%m-%d";

/// One currency's rate on one day, exactly as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRateEntry {
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "@rate")]
    pub rate: String,
}

/// All rates published for one calendar day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDayEntry {
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "Cube", default)]
    pub rates: Vec<RawRateEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DayList {
    #[serde(rename = "Cube", default)]
    days: Vec<RawDayEntry>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Cube", default)]
    cube: DayList,
}

/// The full fetched document, most recent day first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    pub days: Vec<RawDayEntry>,
}

impl FeedDocument {
    /// Deserializes the XML body returned by the feed.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let envelope: Envelope =
            quick_xml::de::from_str(xml).context("Failed to parse reference rate XML")?;
        Ok(FeedDocument {
            days: envelope.cube.days,
        })
    }

    /// Finds the day whose stamp equals `time`.
    pub fn day(&self, time: &str) -> Option<&RawDayEntry> {
        self.days.iter().find(|day| day.time == time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECB_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
    <gesmes:subject>Reference rates</gesmes:subject>
    <gesmes:Sender>
        <gesmes:name>European Central Bank</gesmes:name>
    </gesmes:Sender>
    <Cube>
        <Cube time="2016-11-11">
            <Cube currency="USD" rate="1.0882"/>
            <Cube currency="JPY" rate="115.59"/>
        </Cube>
        <Cube time="2016-11-10">
            <Cube currency="USD" rate="1.0904"/>
        </Cube>
        <Cube time="2016-11-09"/>
    </Cube>
</gesmes:Envelope>"#;

    #[test]
    fn test_parse_ecb_document() {
        let doc = FeedDocument::from_xml(ECB_SAMPLE).unwrap();
        assert_eq!(doc.days.len(), 3);
        assert_eq!(doc.days[0].time, "2016-11-11");
        assert_eq!(
            doc.days[0].rates,
            vec![
                RawRateEntry {
                    currency: "USD".to_string(),
                    rate: "1.0882".to_string(),
                },
                RawRateEntry {
                    currency: "JPY".to_string(),
                    rate: "115.59".to_string(),
                },
            ]
        );
        assert_eq!(doc.days[1].rates.len(), 1);
        assert!(doc.days[2].rates.is_empty());
    }

    #[test]
    fn test_malformed_rate_strings_are_kept() {
        let xml = r#"<Envelope><Cube><Cube time="2016-11-11"><Cube currency="USD" rate="abc"/></Cube></Cube></Envelope>"#;
        let doc = FeedDocument::from_xml(xml).unwrap();
        assert_eq!(doc.days[0].rates[0].rate, "abc");
    }

    #[test]
    fn test_day_lookup_by_stamp() {
        let doc = FeedDocument::from_xml(ECB_SAMPLE).unwrap();
        assert_eq!(doc.day("2016-11-10").map(|d| d.rates.len()), Some(1));
        assert!(doc.day("2016-11-12").is_none());
    }

    #[test]
    fn test_invalid_xml_fails() {
        let result = FeedDocument::from_xml("<Envelope><Cube></Envelope>");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse reference rate XML")
        );
    }
}
