//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, which serves as a unified interface
//! for fetching daily bar data from any market data vendor (e.g., Yahoo Finance, Alpaca).
//!
//! Each concrete provider implementation should implement [`DataProvider`] to handle
//! vendor-specific API logic and response decoding.
//!
//! The trait is designed for async usage and supports dynamic dispatch (`dyn DataProvider`)
//! for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use price_series::models::{bar_series::BarSeries, request_params::BarsRequestParams};
//! use price_series::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries::empty(params.symbol))
//!     }
//! }
//! ```
//!

pub mod alpaca_rest;
pub mod yahoo_chart;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};

/// Trait for fetching daily bar data from a market data provider.
///
/// Implement this trait for each concrete data vendor.
#[async_trait]
pub trait DataProvider {
    /// Fetches daily bars for the given request parameters.
    ///
    /// # Returns
    ///
    /// * `Ok(BarSeries)` - The bars the provider holds for the range, possibly none.
    /// * `Err(ProviderError)` - If the request or the decoding of its answer fails.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError>;
}

#[async_trait]
impl<P> DataProvider for Box<P>
where
    P: DataProvider + Send + Sync + ?Sized,
{
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        (**self).fetch_bars(params).await
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// The configured base URL does not parse.
    #[snafu(display("Invalid base URL {url:?}: {source}"))]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
        backtrace: Backtrace,
    },

    /// The base URL parses but cannot have path segments (e.g. `mailto:`).
    #[snafu(display("Base URL {url:?} cannot carry a path"))]
    OpaqueBaseUrl { url: String, backtrace: Backtrace },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., invalid API key).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider answered, but the payload could not be turned into bars.
    #[snafu(display("Failed to decode provider response: {message}"))]
    Decode {
        message: String,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    /// Whether the underlying transport gave up waiting for the provider.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Reqwest { source, .. } if source.is_timeout())
    }
}
