//! Canonical in-memory representation of one trading day (OHLCV).
//!
//! This struct is used as the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of where the data came from.

use chrono::NaiveDate;

/// A single daily bar.
///
/// This struct is vendor-agnostic. Providers convert their timestamps to the
/// trading day in the exchange's own calendar before building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The trading day this bar covers.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the day.
    pub high: f64,

    /// Lowest price during the day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the day. Not all providers supply this.
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}
