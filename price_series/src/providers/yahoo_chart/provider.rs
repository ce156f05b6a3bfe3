use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use snafu::{ResultExt, ensure};
use tracing::{debug, warn};
use url::Url;

use crate::{
    models::{bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidBaseUrlSnafu,
        OpaqueBaseUrlSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        yahoo_chart::{params::construct_params, response::ChartEnvelope},
    },
};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// Requests without a browser-like agent are throttled aggressively.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) fvg-detector";

pub struct YahooChartProvider {
    client: Client,
    base_url: Url,
}

impl YahooChartProvider {
    /// Creates a provider talking to `base_url` (normally [`DEFAULT_BASE_URL`]).
    ///
    /// `timeout` bounds each HTTP request end to end.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderInitError> {
        let parsed = Url::parse(base_url).context(InvalidBaseUrlSnafu { url: base_url })?;
        ensure!(!parsed.cannot_be_a_base(), OpaqueBaseUrlSnafu { url: base_url });

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// `{base}/v8/finance/chart/{symbol}`, with the symbol as one encoded segment.
    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` only accepts bases that can carry a path.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let url = self.chart_url(&params.symbol);
        let query_params = construct_params(&params);

        let response = self
            .client
            .get(url)
            .query(&query_params)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        // Yahoo reports API errors inside the usual envelope, often with a 404.
        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return ApiSnafu {
                    message: format!("HTTP {status}: {body}"),
                }
                .fail();
            }
            Err(e) => {
                return DecodeSnafu {
                    message: e.to_string(),
                }
                .fail();
            }
        };

        if let Some(error) = envelope.chart.error {
            if error.is_not_found() {
                debug!(symbol = %params.symbol, "yahoo has no chart for symbol");
                return Ok(BarSeries::empty(params.symbol));
            }
            return ApiSnafu {
                message: format!("{}: {}", error.code, error.description),
            }
            .fail();
        }

        if !status.is_success() {
            return ApiSnafu {
                message: format!("HTTP {status}"),
            }
            .fail();
        }

        let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(BarSeries::empty(params.symbol));
        };

        let decoded = result.into_bars().map_err(|ts| {
            DecodeSnafu {
                message: format!("timestamp {ts} is out of range"),
            }
            .build()
        })?;

        if decoded.incomplete_rows > 0 {
            warn!(
                symbol = %params.symbol,
                dropped = decoded.incomplete_rows,
                "dropped rows with missing prices"
            );
        }
        debug!(symbol = %params.symbol, bars = decoded.bars.len(), "yahoo bars fetched");

        Ok(BarSeries {
            symbol: params.symbol,
            bars: decoded.bars,
        })
    }
}
