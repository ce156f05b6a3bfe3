use anyhow::{Context, Result};
use clap::Parser;
use fvg_detector::{
    cli::Cli,
    config::AppConfig,
    detect::detect,
    io::{csv::CsvFileSink, sink::GapSink},
    report,
};
use price_series::SeriesLoader;
use shared_utils::logging::init_tracing;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing("info");
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let provider = config
        .build_provider()
        .with_context(|| format!("failed to set up the {} provider", config.provider))?;
    let loader = SeriesLoader::new(provider).with_exchange_suffix(&config.exchange_suffix);

    let detection = detect(&loader, &cli.symbol, cli.lookback_days).await?;

    println!("{}", report::summary(&detection.symbol, &detection.gaps));
    if detection.gaps.is_empty() {
        return Ok(());
    }
    print!("{}", report::render_table(&detection.gaps));

    let sink = CsvFileSink::new(&config.output_dir, &cli.symbol, cli.lookback_days);
    let path = sink
        .write(&detection.gaps)
        .with_context(|| format!("failed to export {}", sink.path().display()))?;
    info!(path = %path.display(), "gaps exported");

    Ok(())
}
