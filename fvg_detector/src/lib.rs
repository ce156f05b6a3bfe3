//! Fair Value Gap detection over daily price history.
//!
//! [`scan`] is the pure core: it takes an ascending slice of
//! [`Bar`](price_series::Bar)s and reports every three-candle gap together with
//! whether later bars have traded back into it. [`detect`](detect::detect) wires
//! it to a [`SeriesLoader`](price_series::SeriesLoader); [`io`] and [`report`]
//! turn the records into CSV and terminal output.

pub mod cli;
pub mod config;
pub mod detect;
pub mod gap;
pub mod io;
pub mod report;
pub mod scan;

pub use gap::{GapKind, GapRecord, GapStatus};
pub use scan::{ScanError, scan};
