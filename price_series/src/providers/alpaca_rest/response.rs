use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

impl AlpacaBar {
    /// Daily bars are stamped at midnight New York time, so the trading day is
    /// the New York calendar date of the timestamp.
    pub fn into_bar(self) -> Bar {
        Bar::new(
            self.timestamp.with_timezone(&New_York).date_naive(),
            self.open,
            self.high,
            self.low,
            self.close,
        )
        .with_volume(self.volume)
    }
}

#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    #[serde(default)]
    pub bars: Option<IndexMap<String, Vec<AlpacaBar>>>,
    pub next_page_token: Option<String>,
}
