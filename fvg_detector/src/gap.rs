//! Fair Value Gap records as reported to users.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Direction of the imbalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    /// Second candle's low sits above the first candle's high (gap up).
    Bullish,
    /// Second candle's high sits below the first candle's low (gap down).
    Bearish,
}

/// Whether later price action has traded back into the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GapStatus {
    Open,
    Closed,
}

impl GapStatus {
    pub fn from_closed(closed: bool) -> Self {
        if closed {
            GapStatus::Closed
        } else {
            GapStatus::Open
        }
    }
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            GapKind::Bullish => "bullish",
            GapKind::Bearish => "bearish",
        })
    }
}

impl fmt::Display for GapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            GapStatus::Open => "Open",
            GapStatus::Closed => "Closed",
        })
    }
}

/// One detected gap.
///
/// Bounds are rounded to whole price units for display; `lower_bound` never
/// exceeds `upper_bound`. The dates are those of the second and third bar of
/// the triplet that formed the gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapRecord {
    pub kind: GapKind,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: GapStatus,
}

impl GapRecord {
    pub fn is_open(&self) -> bool {
        self.status == GapStatus::Open
    }
}
