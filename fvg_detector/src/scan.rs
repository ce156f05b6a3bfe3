//! Three-candle Fair Value Gap detection.
//!
//! A window of three consecutive bars `c1, c2, c3` slides over the series:
//!
//! - bullish gap when `c2.low > c1.high`, spanning `[c1.high, c2.low]`;
//! - bearish gap when `c2.high < c1.low`, spanning `[c2.high, c1.low]`.
//!
//! A gap is closed once any bar dated after `c3` trades back to the
//! second candle's edge: a low at or below `c2.low` for bullish gaps, a high at
//! or above `c2.high` for bearish ones. Bounds are rounded for reporting only;
//! the closure test always works on the raw prices.

use chrono::NaiveDate;
use price_series::Bar;
use thiserror::Error;
use tracing::debug;

use crate::gap::{GapKind, GapRecord, GapStatus};

#[derive(Debug, Error, PartialEq)]
pub enum ScanError {
    /// A bar whose high is below its low, or whose high/low is NaN.
    #[error("Invalid bar on {date}: high {high} is below low {low}")]
    InvalidBar { date: NaiveDate, high: f64, low: f64 },
}

/// Scans an ascending run of daily bars for Fair Value Gaps.
///
/// Records come back in the order their triplets occur. Fewer than three bars
/// yield an empty result, as does a series without gaps.
pub fn scan(bars: &[Bar]) -> Result<Vec<GapRecord>, ScanError> {
    validate(bars)?;

    let mut gaps = Vec::new();
    for (i, window) in bars.windows(3).enumerate() {
        let (c1, c2, c3) = (&window[0], &window[1], &window[2]);
        let rest = &bars[i + 3..];

        if c2.low > c1.high {
            let closed = touched_after(rest, c3.date, |bar| bar.low <= c2.low);
            gaps.push(GapRecord {
                kind: GapKind::Bullish,
                lower_bound: round_bound(c1.high),
                upper_bound: round_bound(c2.low),
                start_date: c2.date,
                end_date: c3.date,
                status: GapStatus::from_closed(closed),
            });
        }

        if c2.high < c1.low {
            let closed = touched_after(rest, c3.date, |bar| bar.high >= c2.high);
            gaps.push(GapRecord {
                kind: GapKind::Bearish,
                lower_bound: round_bound(c2.high),
                upper_bound: round_bound(c1.low),
                start_date: c2.date,
                end_date: c3.date,
                status: GapStatus::from_closed(closed),
            });
        }
    }

    debug!(bars = bars.len(), gaps = gaps.len(), "scan finished");
    Ok(gaps)
}

/// Whether any bar dated strictly after `after` satisfies `touches`.
fn touched_after(rest: &[Bar], after: NaiveDate, touches: impl Fn(&Bar) -> bool) -> bool {
    rest.iter().filter(|bar| bar.date > after).any(touches)
}

fn validate(bars: &[Bar]) -> Result<(), ScanError> {
    match bars
        .iter()
        .find(|bar| bar.high.is_nan() || bar.low.is_nan() || bar.high < bar.low)
    {
        Some(bar) => Err(ScanError::InvalidBar {
            date: bar.date,
            high: bar.high,
            low: bar.low,
        }),
        None => Ok(()),
    }
}

/// Nearest whole price, ties to even.
fn round_bound(price: f64) -> i64 {
    price.round_ties_even() as i64
}
