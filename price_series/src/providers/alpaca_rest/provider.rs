use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::Bar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu,
        alpaca_rest::{
            params::{AlpacaBarsParams, construct_params},
            response::AlpacaResponse,
        },
    },
};

pub const DEFAULT_BASE_URL: &str = "https://data.alpaca.markets";
const BARS_PATH: &str = "/v2/stocks/bars";

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    options: AlpacaBarsParams,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderInitError> {
        let api_key = get_env_var("APCA_API_KEY_ID").context(MissingEnvVarSnafu)?;
        let secret_key = get_env_var("APCA_API_SECRET_KEY").context(MissingEnvVarSnafu)?;
        let api_key = SecretString::new(api_key.into());
        let secret_key = SecretString::new(secret_key.into());
        Self::with_credentials(base_url, api_key, secret_key, timeout)
    }

    /// Creates a provider from explicit credentials.
    pub fn with_credentials(
        base_url: &str,
        api_key: SecretString,
        secret_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ProviderInitError> {
        let mut key_value =
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?;
        key_value.set_sensitive(true);
        let mut secret_value =
            header::HeaderValue::from_str(secret_key.expose_secret()).context(InvalidApiKeySnafu)?;
        secret_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", key_value);
        headers.insert("APCA-API-SECRET-KEY", secret_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            options: AlpacaBarsParams::default(),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }

    /// Feed and adjustment sent with every page.
    pub fn with_options(mut self, options: AlpacaBarsParams) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let url = format!("{}{}", self.base_url, BARS_PATH);
        let mut bars: Vec<Bar> = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query_params = construct_params(&params, &self.options);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(&url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            if !response.status().is_success() {
                let status = response.status();
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    message: format!("HTTP {status}: {error_msg}"),
                }
                .fail();
            }

            let page = response
                .json::<AlpacaResponse>()
                .await
                .context(ReqwestSnafu)?;

            if let Some(page_bars) = page
                .bars
                .and_then(|mut by_symbol| by_symbol.swap_remove(&params.symbol))
            {
                bars.extend(page_bars.into_iter().map(|ab| ab.into_bar()));
            }

            match page.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        debug!(symbol = %params.symbol, bars = bars.len(), "alpaca bars fetched");

        Ok(BarSeries {
            symbol: params.symbol,
            bars,
        })
    }
}
