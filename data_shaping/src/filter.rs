//! Lookback-window filtering.

use chrono::{DateTime, Duration, Utc};

use market_data::models::{period::Period, series::Series, series::subseries};

/// Keeps the bars whose timestamps fall within `[now - period, now]`.
///
/// Bars are ordered, so the result is a contiguous suffix of the input.
/// A series shorter than the window comes back whole; this never errors.
pub fn filter_by_period(series: &Series, period: Period, now: DateTime<Utc>) -> Series {
    let Some(days) = period.days() else {
        return series.clone();
    };
    let cutoff = now - Duration::days(days);

    let start = series
        .bars()
        .partition_point(|bar| bar.timestamp < cutoff);
    let bars = series.bars()[start..]
        .iter()
        .copied()
        .filter(|bar| bar.timestamp <= now)
        .collect();
    subseries(series, bars)
}
