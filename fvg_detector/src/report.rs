//! Plain-text rendering of scan results for the terminal.

use std::fmt::Write;

use crate::gap::GapRecord;

/// One-line outcome of a scan.
pub fn summary(symbol: &str, gaps: &[GapRecord]) -> String {
    match gaps.len() {
        0 => format!("No FVG found for {symbol}."),
        1 => format!("Found 1 FVG for {symbol}."),
        n => format!("Found {n} FVGs for {symbol}."),
    }
}

/// Fixed-width table, one row per gap. Empty input renders nothing.
pub fn render_table(gaps: &[GapRecord]) -> String {
    let mut out = String::new();
    if gaps.is_empty() {
        return out;
    }

    let low_w = width("lower", gaps.iter().map(|g| g.lower_bound));
    let high_w = width("upper", gaps.iter().map(|g| g.upper_bound));

    let _ = writeln!(
        out,
        "{:<7}  {:>low_w$}  {:>high_w$}  {:<10}  {:<10}  {}",
        "kind", "lower", "upper", "start", "end", "status"
    );
    for gap in gaps {
        let _ = writeln!(
            out,
            "{:<7}  {:>low_w$}  {:>high_w$}  {}  {}  {}",
            gap.kind, gap.lower_bound, gap.upper_bound, gap.start_date, gap.end_date, gap.status
        );
    }
    out
}

fn width(title: &str, values: impl Iterator<Item = i64>) -> usize {
    values
        .map(|v| v.to_string().len())
        .chain(std::iter::once(title.len()))
        .max()
        .unwrap_or(title.len())
}
