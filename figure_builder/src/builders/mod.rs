//! The chart builders. Each is a pure function `(series, options) -> Figure`.

pub mod candlestick;
pub mod detailed;
pub mod line;
pub mod volume;

use chrono::{DateTime, Utc};

use data_shaping::resample::Cadence;
use market_data::models::series::{Series, subseries};

use crate::palette::Palette;

/// Message shown in place of a chart when there is nothing to draw.
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Rendering options shared by all builders.
#[derive(Debug, Clone, Default)]
pub struct DisplayOptions {
    /// Overrides the builder's default title.
    pub title: Option<String>,
    pub palette: Palette,
    /// Visible window; volume cadence follows it and the surface clips to it.
    pub x_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub show_legend: bool,
}

/// Restricts a series to the visible window, if one is set.
pub(crate) fn visible_slice(series: &Series, opts: &DisplayOptions) -> Series {
    match opts.x_range {
        Some((start, end)) => {
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            let bars = series
                .bars()
                .iter()
                .copied()
                .filter(|b| b.timestamp >= lo && b.timestamp <= hi)
                .collect();
            subseries(series, bars)
        }
        None => series.clone(),
    }
}

/// Resample cadence for the visible window, or for the series itself when
/// no window is set.
pub(crate) fn display_cadence(series: &Series, opts: &DisplayOptions) -> Cadence {
    match opts.x_range {
        Some((start, end)) => Cadence::for_span_days((end - start).num_days().abs()),
        None => Cadence::for_series(series),
    }
}
