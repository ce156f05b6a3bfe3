use clap::Parser;

/// Largest accepted lookback, in trading days.
pub const MAX_LOOKBACK_DAYS: u32 = 500;

#[derive(Parser, Debug)]
#[command(author, version, about = "Detect Fair Value Gaps in daily price history")]
pub struct Cli {
    /// Ticker without exchange suffix (e.g. "BBCA")
    pub symbol: String,

    /// Number of most recent trading days to scan
    #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_LOOKBACK_DAYS as i64))]
    pub lookback_days: u32,
}
