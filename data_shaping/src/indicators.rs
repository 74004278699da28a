//! Moving-average indicators derived from a series.
//!
//! Indicator columns live in their own container and never touch the
//! canonical fetched series. SMA columns carry a start offset for the
//! warmup region; EMA columns are full length, seeded at the first close.

use indexmap::IndexMap;
use serde::Serialize;

use market_data::models::series::Series;

/// One derived column: `values[0]` corresponds to row `start_index` of the
/// source series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorColumn {
    pub start_index: usize,
    pub values: Vec<f64>,
}

impl IndicatorColumn {
    /// Value at source-series row `index`, if the column covers it.
    pub fn at(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(self.start_index)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    /// Most recent value, if any.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Derived indicator columns for one series, keyed `sma_<w>` / `ema_<w>`
/// in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorSet {
    pub columns: IndexMap<String, IndicatorColumn>,
}

impl IndicatorSet {
    pub fn get(&self, name: &str) -> Option<&IndicatorColumn> {
        self.columns.get(name)
    }

    pub fn sma(&self, window: usize) -> Option<&IndicatorColumn> {
        self.columns.get(&format!("sma_{window}"))
    }

    pub fn ema(&self, window: usize) -> Option<&IndicatorColumn> {
        self.columns.get(&format!("ema_{window}"))
    }
}

/// Computes SMA and EMA columns for each window in `windows`.
///
/// A series shorter than a window yields an empty SMA column rather than an
/// error; callers plot whatever is there.
pub fn compute_indicators(series: &Series, windows: &[usize]) -> IndicatorSet {
    let closes: Vec<f64> = series.closes().collect();
    let mut set = IndicatorSet::default();
    for &window in windows {
        set.columns
            .insert(format!("sma_{window}"), sma(&closes, window));
        set.columns
            .insert(format!("ema_{window}"), ema(&closes, window));
    }
    set
}

/// Simple moving average; the column starts at row `window - 1`.
pub fn sma(closes: &[f64], window: usize) -> IndicatorColumn {
    if window == 0 || closes.len() < window {
        return IndicatorColumn {
            start_index: closes.len(),
            values: Vec::new(),
        };
    }
    let values = closes
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect();
    IndicatorColumn {
        start_index: window - 1,
        values,
    }
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded at the
/// first close, so the column is full length with no warmup offset.
pub fn ema(closes: &[f64], span: usize) -> IndicatorColumn {
    if span == 0 || closes.is_empty() {
        return IndicatorColumn {
            start_index: 0,
            values: Vec::new(),
        };
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut values = Vec::with_capacity(closes.len());
    let mut current = closes[0];
    values.push(current);
    for &close in &closes[1..] {
        current = alpha * close + (1.0 - alpha) * current;
        values.push(current);
    }
    IndicatorColumn {
        start_index: 0,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use market_data::models::bar::Bar;

    fn series_of_closes(closes: &[f64]) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect();
        Series::new("BTC", bars).unwrap()
    }

    #[test]
    fn sma_values_and_offset() {
        let column = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(column.start_index, 2);
        assert_eq!(column.values, vec![2.0, 3.0, 4.0]);
        assert_eq!(column.at(1), None);
        assert_eq!(column.at(2), Some(2.0));
        assert_eq!(column.at(4), Some(4.0));
    }

    #[test]
    fn sma_window_longer_than_series_is_empty() {
        let column = sma(&[1.0, 2.0], 5);
        assert!(column.values.is_empty());
        assert_eq!(column.at(0), None);
    }

    #[test]
    fn ema_matches_seeded_recurrence() {
        // span 3 -> alpha 0.5
        let column = ema(&[2.0, 4.0, 8.0], 3);
        assert_eq!(column.start_index, 0);
        assert_eq!(column.values, vec![2.0, 3.0, 5.5]);
        assert_eq!(column.last(), Some(5.5));
    }

    #[test]
    fn constant_series_has_flat_indicators() {
        let closes = vec![7.0; 10];
        assert!(sma(&closes, 4).values.iter().all(|&v| v == 7.0));
        assert!(ema(&closes, 4).values.iter().all(|&v| v == 7.0));
    }

    #[test]
    fn compute_indicators_keys_in_order() {
        let series = series_of_closes(&[1.0, 2.0, 3.0, 4.0]);
        let set = compute_indicators(&series, &[2, 3]);
        let keys: Vec<&str> = set.columns.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["sma_2", "ema_2", "sma_3", "ema_3"]);
        assert_eq!(set.sma(2).unwrap().values.len(), 3);
        assert_eq!(set.ema(2).unwrap().values.len(), 4);
    }
}
