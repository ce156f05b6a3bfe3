//! Turns a symbol and a lookback length into an ordered run of daily bars.

use chrono::{Days, NaiveDate, Utc};
use snafu::{ResultExt, Snafu, ensure};
use tracing::debug;

use crate::{
    models::{bar::Bar, request_params::BarsRequestParams},
    providers::{DataProvider, ProviderError},
};

/// Calendar days requested per wanted trading day. Leaves room for weekends
/// and exchange holidays.
pub const WINDOW_MULTIPLIER: u64 = 3;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LoadError {
    /// The caller asked for zero bars.
    #[snafu(display("Lookback must be at least one day, got {lookback_days}"))]
    InvalidLookback { lookback_days: u32 },

    /// The provider holds nothing for the symbol in the requested window.
    #[snafu(display("No price data available for {symbol}"))]
    NoData { symbol: String },

    /// Transport or decoding failure while talking to the provider.
    #[snafu(display("Failed to fetch price history for {symbol}: {source}"))]
    Fetch {
        symbol: String,
        source: ProviderError,
    },
}

/// Loads daily history through a [`DataProvider`].
pub struct SeriesLoader<P> {
    provider: P,
    exchange_suffix: String,
}

impl<P: DataProvider> SeriesLoader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            exchange_suffix: String::new(),
        }
    }

    /// Suffix appended to every user-supplied ticker, e.g. `".JK"`.
    pub fn with_exchange_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.exchange_suffix = suffix.into();
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The symbol as the provider knows it: trimmed, upper-cased, suffixed.
    pub fn provider_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol.trim().to_uppercase(), self.exchange_suffix)
    }

    /// Loads the most recent `lookback_days` daily bars, ending yesterday.
    pub async fn load(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, LoadError> {
        self.load_as_of(symbol, lookback_days, Utc::now().date_naive())
            .await
    }

    /// Same as [`load`](Self::load) with an explicit "today".
    ///
    /// The request covers `[today - 3 * lookback_days, today)`. The answer is
    /// sorted ascending by date, repeated dates keep the last bar reported,
    /// and only the newest `lookback_days` bars are returned.
    pub async fn load_as_of(
        &self,
        symbol: &str,
        lookback_days: u32,
        today: NaiveDate,
    ) -> Result<Vec<Bar>, LoadError> {
        ensure!(lookback_days > 0, InvalidLookbackSnafu { lookback_days });

        let symbol = self.provider_symbol(symbol);
        let params = request_window(&symbol, lookback_days, today);
        debug!(%symbol, start = %params.start, end = %params.end, "requesting daily bars");

        let series = self
            .provider
            .fetch_bars(params)
            .await
            .context(FetchSnafu { symbol: &symbol })?;

        ensure!(!series.is_empty(), NoDataSnafu { symbol: &symbol });

        let fetched = series.bars.len();
        let bars = normalize(series.bars, lookback_days as usize);
        debug!(%symbol, fetched, kept = bars.len(), "daily bars loaded");

        Ok(bars)
    }
}

fn request_window(symbol: &str, lookback_days: u32, today: NaiveDate) -> BarsRequestParams {
    let span = Days::new(u64::from(lookback_days) * WINDOW_MULTIPLIER);
    BarsRequestParams {
        symbol: symbol.to_string(),
        start: today.checked_sub_days(span).unwrap_or(NaiveDate::MIN),
        end: today,
    }
}

/// Sorts ascending, collapses repeated dates (last one wins) and keeps the
/// newest `keep` bars.
fn normalize(mut bars: Vec<Bar>, keep: usize) -> Vec<Bar> {
    // Stable, so bars sharing a date stay in provider order.
    bars.sort_by_key(|bar| bar.date);

    let mut unique: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match unique.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => unique.push(bar),
        }
    }

    if unique.len() > keep {
        unique.drain(..unique.len() - keep);
    }
    unique
}
