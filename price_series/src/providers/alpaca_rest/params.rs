use std::str::FromStr;

use crate::models::request_params::BarsRequestParams;

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

impl Adjustment {
    pub fn as_str(self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

impl FromStr for Adjustment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Adjustment::Raw),
            "split" => Ok(Adjustment::Split),
            "dividend" => Ok(Adjustment::Dividend),
            "all" => Ok(Adjustment::All),
            other => Err(format!(
                "unknown adjustment {other:?}, expected raw, split, dividend or all"
            )),
        }
    }
}

/// Specifies the source feed for stock data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

impl Feed {
    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

impl FromStr for Feed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sip" => Ok(Feed::Sip),
            "iex" => Ok(Feed::Iex),
            "otc" => Ok(Feed::Otc),
            other => Err(format!("unknown feed {other:?}, expected sip, iex or otc")),
        }
    }
}

/// Alpaca-specific parameters for a bars request.
///
/// `None` leaves the choice to Alpaca, which picks the best feed the account
/// is entitled to and no adjustment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlpacaBarsParams {
    pub adjustment: Option<Adjustment>,
    pub feed: Option<Feed>,
}

/// Builds the query string for one page of a daily bars request.
///
/// Alpaca treats `end` as inclusive, so the exclusive end of
/// [`BarsRequestParams`] is moved back by one day.
pub fn construct_params(
    params: &BarsRequestParams,
    options: &AlpacaBarsParams,
) -> Vec<(String, String)> {
    let end = params.end.pred_opt().unwrap_or(params.end);

    let mut query = vec![
        ("symbols".to_string(), params.symbol.clone()),
        ("timeframe".to_string(), "1Day".to_string()),
        ("start".to_string(), params.start.format("%Y-%m-%d").to_string()),
        ("end".to_string(), end.format("%Y-%m-%d").to_string()),
        ("sort".to_string(), "asc".to_string()),
    ];
    if let Some(adjustment) = options.adjustment {
        query.push(("adjustment".to_string(), adjustment.as_str().to_string()));
    }
    if let Some(feed) = options.feed {
        query.push(("feed".to_string(), feed.as_str().to_string()));
    }
    query
}
