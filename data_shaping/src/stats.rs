//! Summary statistics and the SMA crossover trend signal.

use serde::Serialize;
use thiserror::Error;

use market_data::models::series::Series;

use crate::indicators::IndicatorSet;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// Zero rows after filtering; callers show a placeholder instead.
    #[error("cannot summarize an empty series")]
    EmptySeries,
}

/// Window statistics for one shaped series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub min_close: f64,
    pub max_close: f64,
    pub mean_close: f64,
    /// Close-to-close change over the window, in percent.
    pub percent_change: f64,
    /// Std-dev of bar-to-bar returns, in percent.
    pub volatility: f64,
    /// Highest high in the window.
    pub period_high: f64,
    /// Lowest low in the window.
    pub period_low: f64,
    pub avg_volume: f64,
    pub last_close: f64,
    pub data_points: usize,
}

/// Computes [`SummaryStats`] over every bar in `series`.
///
/// A single-row series is legal and reports zero volatility and a 0%
/// change; an empty one is the caller's signal to render an empty state.
pub fn summary_stats(series: &Series) -> Result<SummaryStats, StatsError> {
    let bars = series.bars();
    if bars.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let n = bars.len() as f64;
    let first_close = bars[0].close;
    let last_close = bars[bars.len() - 1].close;

    let mut min_close = f64::INFINITY;
    let mut max_close = f64::NEG_INFINITY;
    let mut period_high = f64::NEG_INFINITY;
    let mut period_low = f64::INFINITY;
    let mut close_sum = 0.0;
    let mut volume_sum = 0.0;
    for bar in bars {
        min_close = min_close.min(bar.close);
        max_close = max_close.max(bar.close);
        period_high = period_high.max(bar.high);
        period_low = period_low.min(bar.low);
        close_sum += bar.close;
        volume_sum += bar.volume;
    }

    let percent_change = if first_close != 0.0 {
        (last_close - first_close) / first_close * 100.0
    } else {
        0.0
    };

    Ok(SummaryStats {
        min_close,
        max_close,
        mean_close: close_sum / n,
        percent_change,
        volatility: return_volatility(bars.iter().map(|b| b.close)),
        period_high,
        period_low,
        avg_volume: volume_sum / n,
        last_close,
        data_points: bars.len(),
    })
}

/// Population std-dev of simple returns, in percent. Fewer than two closes
/// means no returns and zero volatility.
fn return_volatility(closes: impl Iterator<Item = f64>) -> f64 {
    let closes: Vec<f64> = closes.collect();
    if closes.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    if returns.is_empty() {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    variance.sqrt() * 100.0
}

/// Crossover signal from the two configured SMA columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    /// Short SMA above long SMA (golden cross).
    Bullish,
    /// Short SMA below long SMA (death cross).
    Bearish,
}

/// Compares the latest short/long SMA values; `None` while either column is
/// still in warmup.
pub fn trend_signal(indicators: &IndicatorSet, short: usize, long: usize) -> Option<Trend> {
    let short_val = indicators.sma(short)?.last()?;
    let long_val = indicators.sma(long)?.last()?;
    if short_val >= long_val {
        Some(Trend::Bullish)
    } else {
        Some(Trend::Bearish)
    }
}
