//! Yahoo Finance chart API provider.
//!
//! Keyless, and covers non-US listings through exchange suffixes such as
//! `.JK` (Indonesia Stock Exchange).

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooChartProvider;
