//! A collection of daily bars for a specific symbol.

use crate::models::bar::Bar;

/// Represents a complete set of daily bars for a single symbol.
///
/// An empty `bars` vector is how providers report "no data for this symbol
/// and window"; it is not an error at this level.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The provider-facing symbol this data represents (e.g., "BBCA.JK", "AAPL").
    pub symbol: String,
    /// The collection of OHLCV bars, in the order the provider returned them.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
