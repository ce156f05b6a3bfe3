use async_trait::async_trait;
use chrono::NaiveDate;
use fvg_detector::{
    GapKind, GapStatus,
    detect::{DetectError, detect},
    io::{csv::CsvFileSink, sink::GapSink},
};
use price_series::{
    Bar, BarSeries, BarsRequestParams, LoadError, SeriesLoader,
    providers::{DataProvider, ProviderError},
};

struct CannedProvider(Vec<Bar>);

#[async_trait]
impl DataProvider for CannedProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        Ok(BarSeries {
            symbol: params.symbol,
            bars: self.0.clone(),
        })
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

fn hl(d: u32, high: f64, low: f64) -> Bar {
    Bar::new(day(d), low, high, low, high)
}

#[tokio::test]
async fn loads_scans_and_exports() {
    // Provider answers newest-first; the loader must reorder before scanning.
    let bars = vec![
        hl(5, 106.0, 102.0),
        hl(4, 108.0, 103.0),
        hl(3, 110.0, 105.0),
        hl(2, 100.0, 95.0),
        hl(1, 99.0, 96.0),
    ];
    let loader = SeriesLoader::new(CannedProvider(bars)).with_exchange_suffix(".JK");

    let detection = detect(&loader, "bbca", 4).await.unwrap();

    assert_eq!(detection.symbol, "BBCA.JK");
    assert_eq!(detection.bars, 4);
    assert_eq!(detection.gaps.len(), 1);
    let gap = &detection.gaps[0];
    assert_eq!(gap.kind, GapKind::Bullish);
    assert_eq!((gap.lower_bound, gap.upper_bound), (100, 105));
    assert_eq!((gap.start_date, gap.end_date), (day(3), day(4)));
    assert_eq!(gap.status, GapStatus::Closed);

    let dir = tempfile::tempdir().unwrap();
    let path = CsvFileSink::new(dir.path(), "bbca", 4)
        .write(&detection.gaps)
        .unwrap();
    let csv = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        csv,
        "kind,lower_bound,upper_bound,start_date,end_date,status\n\
         bullish,100,105,2025-05-03,2025-05-04,Closed\n"
    );
}

#[tokio::test]
async fn no_gaps_is_success() {
    let bars = (1..=6).map(|d| hl(d, 100.0, 90.0)).collect();
    let loader = SeriesLoader::new(CannedProvider(bars));

    let detection = detect(&loader, "AAPL", 30).await.unwrap();

    assert!(detection.gaps.is_empty());
    assert_eq!(detection.bars, 6);
}

#[tokio::test]
async fn empty_history_is_no_data() {
    let loader = SeriesLoader::new(CannedProvider(Vec::new()));

    let err = detect(&loader, "AAPL", 30).await.unwrap_err();

    assert!(matches!(err, DetectError::Load(LoadError::NoData { .. })));
}

#[tokio::test]
async fn corrupt_bar_stops_the_scan() {
    let bars = vec![hl(1, 100.0, 95.0), hl(2, 90.0, 99.0), hl(3, 92.0, 85.0)];
    let loader = SeriesLoader::new(CannedProvider(bars));

    let err = detect(&loader, "AAPL", 30).await.unwrap_err();

    assert!(matches!(err, DetectError::Scan(_)));
    assert!(err.to_string().contains("2025-05-02"));
}
