//! Filled close-price line chart.

use market_data::models::series::Series;

use crate::builders::{DisplayOptions, NO_DATA_MESSAGE, visible_slice};
use crate::figure::{Dash, Figure, Panel, Trace};
use crate::palette::rgba;

/// Builds the simple price chart: one filled line over the closes.
pub fn price_line(series: &Series, opts: &DisplayOptions) -> Figure {
    let title = opts
        .title
        .clone()
        .unwrap_or_else(|| format!("{} Price Chart", series.symbol()));

    let visible = visible_slice(series, opts);
    if visible.is_empty() {
        return Figure::empty_state(Some(title), NO_DATA_MESSAGE);
    }

    let colors = opts.palette.get(series.symbol());
    let trace = Trace::Line {
        name: format!("{} Price", series.symbol()),
        panel: 0,
        x: visible.bars().iter().map(|b| b.timestamp).collect(),
        y: visible.closes().collect(),
        color: rgba(&colors.primary, 0.8),
        width: 2.0,
        dash: Dash::Solid,
        fill: Some(rgba(&colors.secondary, 0.3)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use market_data::models::bar::Bar;

    use crate::palette::Palette;

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
    fn builds_one_filled_line() {
        let fig = price_line(&series_of_closes(&[1.0, 2.0, 3.0]), &DisplayOptions::default());
        assert_eq!(fig.traces.len(), 1);
        match &fig.traces[0] {
            Trace::Line { y, fill, .. } => {
                assert_eq!(y, &vec![1.0, 2.0, 3.0]);
                assert!(fill.is_some());
            }
            other => panic!("expected line trace, got {other:?}"),
        }
        assert_eq!(fig.title.as_deref(), Some("BTC Price Chart"));
    }

    #[test]
    fn empty_series_yields_empty_state() {
        let fig = price_line(&Series::empty("BTC"), &DisplayOptions::default());
        assert!(fig.is_empty());
        assert_eq!(fig.annotations[0].text, NO_DATA_MESSAGE);
    }

    #[test]
    fn symbol_color_flows_from_palette() {
        let fig = price_line(
            &series_of_closes(&[1.0]),
            &DisplayOptions {
                palette: Palette::default(),
                ..DisplayOptions::default()
            },
        );
        match &fig.traces[0] {
            Trace::Line { color, .. } => assert_eq!(color, "rgba(255, 165, 0, 0.8)"),
            other => panic!("expected line trace, got {other:?}"),
        }
    }
}
