//! Outlier rejection over bar-to-bar price changes.
//!
//! Feeds with flaky upstreams occasionally emit one-bar price glitches that
//! dwarf any real move. Those bars are dropped, never interpolated: the
//! filter must not fabricate prices.

use market_data::models::series::{Series, subseries};

/// Drops bars whose close deviates from the last *retained* close by more
/// than `threshold` (fractional, e.g. `0.5` = 50%).
///
/// Comparing against the last retained close (instead of the raw previous
/// bar) guarantees that no retained adjacent pair exceeds the threshold,
/// even after drops open a gap.
///
/// If the pass would remove more than `max_drop_fraction` of the rows the
/// series is returned unchanged: wiping a large share of the data signals a
/// pathological threshold, not bad data.
pub fn filter_spikes(series: &Series, threshold: f64, max_drop_fraction: f64) -> Series {
    if series.len() < 2 || threshold <= 0.0 {
        return series.clone();
    }

    let bars = series.bars();
    let mut retained = Vec::with_capacity(bars.len());
    retained.push(bars[0]);
    let mut last_close = bars[0].close;

    for bar in &bars[1..] {
        if relative_change(last_close, bar.close) > threshold {
            continue;
        }
        retained.push(*bar);
        last_close = bar.close;
    }

    let dropped = bars.len() - retained.len();
    if dropped as f64 > max_drop_fraction * bars.len() as f64 {
        return series.clone();
    }

    subseries(series, retained)
}

fn relative_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    ((current - previous) / previous).abs()
}
