//! Runtime settings, read from the environment.

use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use price_series::providers::{
    DataProvider, ProviderInitError,
    alpaca_rest::{
        self, AlpacaProvider,
        params::{Adjustment, AlpacaBarsParams, Feed},
    },
    yahoo_chart::{self, YahooChartProvider},
};
use shared_utils::env::{InvalidEnvVarError, get_env_opt, get_env_or};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidEnvVar(#[from] InvalidEnvVarError),

    #[error("FVG_HTTP_TIMEOUT_SECS must be at least 1")]
    ZeroTimeout,
}

/// Which market data vendor backs the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Alpaca,
}

impl ProviderKind {
    /// Suffix used when `FVG_EXCHANGE_SUFFIX` is unset.
    ///
    /// Yahoo needs the exchange suffix for IDX listings. Alpaca only serves
    /// US equities, which take none.
    pub fn default_exchange_suffix(self) -> &'static str {
        match self {
            ProviderKind::Yahoo => ".JK",
            ProviderKind::Alpaca => "",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yahoo" => Ok(ProviderKind::Yahoo),
            "alpaca" => Ok(ProviderKind::Alpaca),
            other => Err(format!("unknown provider {other:?}, expected \"yahoo\" or \"alpaca\"")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::Yahoo => "yahoo",
            ProviderKind::Alpaca => "alpaca",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `FVG_PROVIDER`
    pub provider: ProviderKind,
    /// `FVG_EXCHANGE_SUFFIX`, appended to every ticker. May be empty. Defaults
    /// to [`ProviderKind::default_exchange_suffix`].
    pub exchange_suffix: String,
    /// `FVG_HTTP_TIMEOUT_SECS`
    pub http_timeout: Duration,
    /// `FVG_OUTPUT_DIR`, where CSV exports land.
    pub output_dir: PathBuf,
    /// `FVG_YAHOO_BASE_URL`
    pub yahoo_base_url: String,
    /// `FVG_ALPACA_BASE_URL`
    pub alpaca_base_url: String,
    /// `FVG_ALPACA_FEED` (`sip`, `iex`, `otc`). Free accounts need `iex`.
    pub alpaca_feed: Option<Feed>,
    /// `FVG_ALPACA_ADJUSTMENT` (`raw`, `split`, `dividend`, `all`).
    pub alpaca_adjustment: Option<Adjustment>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let provider = ProviderKind::default();
        Self {
            provider,
            exchange_suffix: provider.default_exchange_suffix().to_string(),
            http_timeout: Duration::from_secs(30),
            output_dir: PathBuf::from("."),
            yahoo_base_url: yahoo_chart::provider::DEFAULT_BASE_URL.to_string(),
            alpaca_base_url: alpaca_rest::provider::DEFAULT_BASE_URL.to_string(),
            alpaca_feed: None,
            alpaca_adjustment: None,
        }
    }
}

impl AppConfig {
    /// Reads every setting, falling back to [`AppConfig::default`] for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_secs: u64 =
            get_env_or("FVG_HTTP_TIMEOUT_SECS", defaults.http_timeout.as_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let provider = get_env_or("FVG_PROVIDER", defaults.provider)?;
        let exchange_suffix = get_env_or(
            "FVG_EXCHANGE_SUFFIX",
            provider.default_exchange_suffix().to_string(),
        )?;

        Ok(Self {
            provider,
            exchange_suffix,
            http_timeout: Duration::from_secs(timeout_secs),
            output_dir: get_env_or("FVG_OUTPUT_DIR", defaults.output_dir)?,
            yahoo_base_url: get_env_or("FVG_YAHOO_BASE_URL", defaults.yahoo_base_url)?,
            alpaca_base_url: get_env_or("FVG_ALPACA_BASE_URL", defaults.alpaca_base_url)?,
            alpaca_feed: get_env_opt("FVG_ALPACA_FEED")?,
            alpaca_adjustment: get_env_opt("FVG_ALPACA_ADJUSTMENT")?,
        })
    }

    pub fn alpaca_options(&self) -> AlpacaBarsParams {
        AlpacaBarsParams {
            adjustment: self.alpaca_adjustment,
            feed: self.alpaca_feed,
        }
    }

    /// Builds the configured provider behind a trait object.
    pub fn build_provider(&self) -> Result<Box<dyn DataProvider + Send + Sync>, ProviderInitError> {
        match self.provider {
            ProviderKind::Yahoo => {
                let p = YahooChartProvider::new(&self.yahoo_base_url, self.http_timeout)?;
                Ok(Box::new(p))
            }
            ProviderKind::Alpaca => {
                let p = AlpacaProvider::new(&self.alpaca_base_url, self.http_timeout)?
                    .with_options(self.alpaca_options());
                Ok(Box::new(p))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use price_series::SeriesLoader;
    use serial_test::serial;

    use super::*;

    const VARS: [&str; 8] = [
        "FVG_PROVIDER",
        "FVG_EXCHANGE_SUFFIX",
        "FVG_HTTP_TIMEOUT_SECS",
        "FVG_OUTPUT_DIR",
        "FVG_YAHOO_BASE_URL",
        "FVG_ALPACA_BASE_URL",
        "FVG_ALPACA_FEED",
        "FVG_ALPACA_ADJUSTMENT",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        assert_eq!(AppConfig::from_env().unwrap(), AppConfig::default());
    }

    #[test]
    #[serial]
    fn overrides_are_read() {
        clear_env();
        unsafe {
            std::env::set_var("FVG_PROVIDER", "Alpaca");
            std::env::set_var("FVG_EXCHANGE_SUFFIX", "");
            std::env::set_var("FVG_HTTP_TIMEOUT_SECS", "5");
            std::env::set_var("FVG_OUTPUT_DIR", "/tmp/fvg");
        }

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.provider, ProviderKind::Alpaca);
        assert_eq!(config.exchange_suffix, "");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/fvg"));
    }

    #[test]
    #[serial]
    fn unknown_provider_is_rejected() {
        clear_env();
        unsafe { std::env::set_var("FVG_PROVIDER", "bloomberg") };

        let err = AppConfig::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("FVG_PROVIDER"));
        assert!(err.to_string().contains("bloomberg"));
    }

    #[test]
    #[serial]
    fn zero_timeout_is_rejected() {
        clear_env();
        unsafe { std::env::set_var("FVG_HTTP_TIMEOUT_SECS", "0") };

        let err = AppConfig::from_env().unwrap_err();
        clear_env();

        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    #[serial]
    fn alpaca_defaults_to_bare_tickers() {
        clear_env();
        unsafe {
            std::env::set_var("FVG_PROVIDER", "alpaca");
            std::env::set_var("APCA_API_KEY_ID", "key");
            std::env::set_var("APCA_API_SECRET_KEY", "secret");
        }

        let config = AppConfig::from_env().unwrap();
        let provider = config.build_provider();
        clear_env();
        unsafe {
            std::env::remove_var("APCA_API_KEY_ID");
            std::env::remove_var("APCA_API_SECRET_KEY");
        }

        assert_eq!(config.exchange_suffix, "");
        let loader =
            SeriesLoader::new(provider.unwrap()).with_exchange_suffix(&config.exchange_suffix);
        assert_eq!(loader.provider_symbol("aapl"), "AAPL");
    }

    #[test]
    #[serial]
    fn explicit_suffix_wins_over_provider_default() {
        clear_env();
        unsafe {
            std::env::set_var("FVG_PROVIDER", "alpaca");
            std::env::set_var("FVG_EXCHANGE_SUFFIX", ".TO");
        }

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.exchange_suffix, ".TO");
    }

    #[test]
    #[serial]
    fn alpaca_options_are_read() {
        clear_env();
        unsafe {
            std::env::set_var("FVG_ALPACA_FEED", "IEX");
            std::env::set_var("FVG_ALPACA_ADJUSTMENT", "all");
        }

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(
            config.alpaca_options(),
            AlpacaBarsParams {
                adjustment: Some(Adjustment::All),
                feed: Some(Feed::Iex),
            }
        );
    }

    #[test]
    #[serial]
    fn unknown_alpaca_feed_is_rejected() {
        clear_env();
        unsafe { std::env::set_var("FVG_ALPACA_FEED", "delayed") };

        let err = AppConfig::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("FVG_ALPACA_FEED"));
    }

    #[test]
    fn yahoo_provider_builds_without_credentials() {
        assert!(AppConfig::default().build_provider().is_ok());
    }
}
