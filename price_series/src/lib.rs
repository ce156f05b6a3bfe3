//! Daily price history retrieval.
//!
//! [`loader::SeriesLoader`] asks a [`providers::DataProvider`] for a window of
//! daily bars and normalises the answer into an ascending, de-duplicated
//! `Vec<Bar>` of at most the requested length.

pub mod loader;
pub mod models;
pub mod providers;

pub use loader::{LoadError, SeriesLoader};
pub use models::{bar::Bar, bar_series::BarSeries, request_params::BarsRequestParams};
