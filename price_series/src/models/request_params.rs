use chrono::NaiveDate;

/// Universal parameters for requesting daily bars from any market data provider.
///
/// It is intended as the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarsRequestParams {
    /// Provider-facing symbol, exchange suffix included (e.g. `"BBCA.JK"`).
    pub symbol: String,

    /// First calendar day of the requested range (inclusive).
    pub start: NaiveDate,

    /// End of the requested range (exclusive).
    ///
    /// Providers should return bars strictly before this day.
    pub end: NaiveDate,
}
