//! Load-then-scan pipeline behind the binary.

use price_series::{LoadError, SeriesLoader, providers::DataProvider};
use thiserror::Error;
use tracing::info;

use crate::{
    gap::GapRecord,
    scan::{ScanError, scan},
};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Result of one detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Symbol as sent to the provider, exchange suffix included.
    pub symbol: String,
    /// Number of bars that were scanned.
    pub bars: usize,
    pub gaps: Vec<GapRecord>,
}

/// Loads the last `lookback_days` bars of `symbol` and scans them.
///
/// Zero gaps is a successful outcome. Errors are passed through untouched.
pub async fn detect<P: DataProvider>(
    loader: &SeriesLoader<P>,
    symbol: &str,
    lookback_days: u32,
) -> Result<Detection, DetectError> {
    let bars = loader.load(symbol, lookback_days).await?;
    let gaps = scan(&bars)?;

    let symbol = loader.provider_symbol(symbol);
    let open = gaps.iter().filter(|g| g.is_open()).count();
    info!(%symbol, bars = bars.len(), gaps = gaps.len(), open, "scan complete");

    Ok(Detection {
        symbol,
        bars: bars.len(),
        gaps,
    })
}
