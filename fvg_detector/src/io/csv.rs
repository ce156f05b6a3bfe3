//! Comma-separated export of gap records.
//!
//! Header `kind,lower_bound,upper_bound,start_date,end_date,status`, one
//! record per line, ISO 8601 dates.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use snafu::ResultExt;
use tracing::debug;

use crate::{
    gap::GapRecord,
    io::sink::{EncodeSnafu, GapSink, IoSnafu, SinkError},
};

/// Serialises `gaps` as CSV into any writer.
pub fn write_csv<W: Write>(writer: W, gaps: &[GapRecord]) -> Result<(), ::csv::Error> {
    let mut writer = ::csv::Writer::from_writer(writer);
    if gaps.is_empty() {
        writer.write_record(HEADER)?;
    }
    for gap in gaps {
        writer.serialize(gap)?;
    }
    writer.flush()?;
    Ok(())
}

const HEADER: [&str; 6] = [
    "kind",
    "lower_bound",
    "upper_bound",
    "start_date",
    "end_date",
    "status",
];

/// `FVG_{SYMBOL}_{N}days.csv`
///
/// Characters that would leave the target directory or are reserved on common
/// filesystems (`BRK/B`, `BRK\B`) are replaced by `_`.
pub fn export_file_name(symbol: &str, lookback_days: u32) -> String {
    let symbol: String = symbol
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("FVG_{symbol}_{lookback_days}days.csv")
}

/// Writes one CSV file per scan into a directory.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    /// Sink for the export of `symbol` over `lookback_days` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, symbol: &str, lookback_days: u32) -> Self {
        Self {
            path: dir.as_ref().join(export_file_name(symbol, lookback_days)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GapSink for CsvFileSink {
    type Output = PathBuf;

    fn write(&self, gaps: &[GapRecord]) -> Result<PathBuf, SinkError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context(IoSnafu { path: dir })?;
        }
        let file = File::create(&self.path).context(IoSnafu { path: &self.path })?;
        write_csv(file, gaps).context(EncodeSnafu)?;

        debug!(path = %self.path.display(), records = gaps.len(), "csv export written");
        Ok(self.path.clone())
    }
}
