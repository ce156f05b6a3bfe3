//! Wire format of `/v8/finance/chart/{symbol}`.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ChartError {
    /// Yahoo answers unknown or delisted symbols with this code.
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("Not Found")
    }
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Absent when the window holds no trading days.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub exchange_timezone_name: Option<String>,
    #[serde(default)]
    pub gmtoffset: Option<i32>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented prices; `null` marks a day the exchange reported nothing for.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

/// Time zone used to turn bar timestamps into trading days.
#[derive(Debug, Clone, Copy)]
pub enum ExchangeZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl ExchangeZone {
    pub fn date_of(&self, unix_seconds: i64) -> Option<NaiveDate> {
        let utc = DateTime::from_timestamp(unix_seconds, 0)?;
        Some(match self {
            ExchangeZone::Named(tz) => utc.with_timezone(tz).date_naive(),
            ExchangeZone::Fixed(offset) => utc.with_timezone(offset).date_naive(),
        })
    }
}

impl ChartMeta {
    /// Prefers the IANA zone name, then the raw offset, then UTC.
    pub fn exchange_zone(&self) -> ExchangeZone {
        if let Some(tz) = self
            .exchange_timezone_name
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
        {
            return ExchangeZone::Named(tz);
        }
        let offset = self
            .gmtoffset
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        ExchangeZone::Fixed(offset)
    }
}

/// Bars decoded from one chart result.
#[derive(Debug, Default)]
pub struct DecodedBars {
    pub bars: Vec<Bar>,
    /// Rows dropped because one of open/high/low/close was `null`.
    pub incomplete_rows: usize,
}

impl ChartResult {
    /// Zips the timestamp column with the first quote block.
    ///
    /// Returns the offending timestamp when it cannot be represented as a date.
    pub fn into_bars(self) -> Result<DecodedBars, i64> {
        let zone = self.meta.exchange_zone();
        let timestamps = self.timestamp.unwrap_or_default();
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        let cell = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

        let mut decoded = DecodedBars::default();
        for (i, ts) in timestamps.into_iter().enumerate() {
            let date = zone.date_of(ts).ok_or(ts)?;
            let (Some(open), Some(high), Some(low), Some(close)) = (
                cell(&quote.open, i),
                cell(&quote.high, i),
                cell(&quote.low, i),
                cell(&quote.close, i),
            ) else {
                decoded.incomplete_rows += 1;
                continue;
            };

            let mut bar = Bar::new(date, open, high, low, close);
            bar.volume = cell(&quote.volume, i);
            decoded.bars.push(bar);
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAKARTA_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "IDR",
                    "symbol": "BBCA.JK",
                    "exchangeTimezoneName": "Asia/Jakarta",
                    "gmtoffset": 25200
                },
                "timestamp": [1736128800, 1736215200, 1736301600],
                "indicators": {
                    "quote": [{
                        "open":   [9700, 9650, null],
                        "high":   [9750, 9700, null],
                        "low":    [9600, 9575, null],
                        "close":  [9675, 9600, null],
                        "volume": [51234500, 48011200, null]
                    }],
                    "adjclose": [{"adjclose": [9675, 9600, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn decodes_rows_in_exchange_time() {
        let envelope: ChartEnvelope = serde_json::from_str(JAKARTA_BODY).unwrap();
        let result = envelope.chart.result.unwrap().remove(0);
        let decoded = result.into_bars().unwrap();

        assert_eq!(decoded.incomplete_rows, 1);
        assert_eq!(decoded.bars.len(), 2);
        // 02:00 UTC is 09:00 in Jakarta.
        assert_eq!(decoded.bars[0].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(decoded.bars[1].date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        assert_eq!(decoded.bars[1].low, 9575.0);
        assert_eq!(decoded.bars[0].volume, Some(51234500.0));
    }

    #[test]
    fn empty_window_has_no_timestamp_column() {
        let body = r#"{"chart": {"result": [{"meta": {"symbol": "BBCA.JK"}, "indicators": {"quote": [{}]}}], "error": null}}"#;
        let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
        let decoded = envelope.chart.result.unwrap().remove(0).into_bars().unwrap();
        assert!(decoded.bars.is_empty());
        assert_eq!(decoded.incomplete_rows, 0);
    }

    #[test]
    fn offset_is_used_when_zone_name_is_unknown() {
        let meta = ChartMeta {
            exchange_timezone_name: Some("Mars/Olympus_Mons".into()),
            gmtoffset: Some(-5 * 3600),
        };
        // 2025-01-07T03:00:00Z is still the 6th at UTC-5.
        let date = meta.exchange_zone().date_of(1736218800).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    }

    #[test]
    fn not_found_error_is_recognised() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.chart.result.is_none());
        assert!(envelope.chart.error.unwrap().is_not_found());
    }
}
