//! OHLC candlestick chart.

use market_data::models::series::Series;

use crate::builders::{DisplayOptions, NO_DATA_MESSAGE, visible_slice};
use crate::figure::{Figure, Panel, Trace};

/// Builds a candlestick figure over the visible window.
pub fn candlestick(series: &Series, opts: &DisplayOptions) -> Figure {
    let title = opts
        .title
        .clone()
        .unwrap_or_else(|| format!("{} Candlestick", series.symbol()));

    let visible = visible_slice(series, opts);
    if visible.is_empty() {
        return Figure::empty_state(Some(title), NO_DATA_MESSAGE);
    }

    let bars = visible.bars();
    let trace = Trace::Candlestick {
        name: series.symbol().to_string(),
        panel: 0,
        x: bars.iter().map(|b| b.timestamp).collect(),
        open: bars.iter().map(|b| b.open).collect(),
        high: bars.iter().map(|b| b.high).collect(),
        low: bars.iter().map(|b| b.low).collect(),
        close: bars.iter().map(|b| b.close).collect(),
    };

    Figure {
        title: Some(title),
        panels: vec![Panel {
            y_title: "Price (USD)".to_string(),
            height_fraction: 1.0,
        }],
        traces: vec![trace],
        annotations: Vec::new(),
        show_legend: opts.show_legend,
        x_range: opts.x_range,
    }
}
