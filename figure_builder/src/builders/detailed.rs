//! Two-panel analysis view: price with indicator overlays on top,
//! aggregated volume below.

use data_shaping::indicators::compute_indicators;
use data_shaping::resample::resample;
use market_data::models::series::Series;

use crate::builders::{DisplayOptions, NO_DATA_MESSAGE, display_cadence, visible_slice};
use crate::figure::{Dash, Figure, Panel, Trace};
use crate::palette::rgba;

const PRICE_PANEL: usize = 0;
const VOLUME_PANEL: usize = 1;

/// Colors cycled through the indicator overlays, in insertion order.
const OVERLAY_COLORS: [&str; 4] = [
    "rgba(231, 76, 60, 0.8)",
    "rgba(155, 89, 182, 0.8)",
    "rgba(243, 156, 18, 0.8)",
    "rgba(26, 188, 156, 0.8)",
];

/// Builds the detailed figure: close/high/low lines with moving-average
/// overlays in the price panel, direction-colored volume bars beneath.
pub fn detailed(series: &Series, opts: &DisplayOptions, windows: &[usize]) -> Figure {
    let title = opts
        .title
        .clone()
        .unwrap_or_else(|| format!("{} Detailed Analysis", series.symbol()));

    let visible = visible_slice(series, opts);
    if visible.is_empty() {
        return Figure::empty_state(Some(title), NO_DATA_MESSAGE);
    }

    let colors = opts.palette.get(series.symbol());
    let bars = visible.bars();
    let x: Vec<_> = bars.iter().map(|b| b.timestamp).collect();

    let mut traces = vec![
        Trace::Line {
            name: "Close".to_string(),
            panel: PRICE_PANEL,
            x: x.clone(),
            y: bars.iter().map(|b| b.close).collect(),
            color: rgba(&colors.primary, 0.9),
            width: 2.0,
            dash: Dash::Solid,
            fill: None,
        },
        Trace::Line {
            name: "High".to_string(),
            panel: PRICE_PANEL,
            x: x.clone(),
            y: bars.iter().map(|b| b.high).collect(),
            color: rgba(&colors.secondary, 0.4),
            width: 1.0,
            dash: Dash::Solid,
            fill: None,
        },
        Trace::Line {
            name: "Low".to_string(),
            panel: PRICE_PANEL,
            x: x.clone(),
            y: bars.iter().map(|b| b.low).collect(),
            color: rgba(&colors.secondary, 0.4),
            width: 1.0,
            dash: Dash::Solid,
            fill: None,
        },
    ];

    let indicators = compute_indicators(&visible, windows);
    let mut overlay_colors = OVERLAY_COLORS.iter().cycle();
    for (key, column) in &indicators.columns {
        if column.values.is_empty() {
            continue;
        }
        // Column rows map to source rows starting at start_index.
        let overlay_x: Vec<_> = x
            .iter()
            .skip(column.start_index)
            .take(column.values.len())
            .copied()
            .collect();
        let dash = if key.starts_with("ema") {
            Dash::Dot
        } else {
            Dash::Dash
        };
        traces.push(Trace::Line {
            name: display_name(key),
            panel: PRICE_PANEL,
            x: overlay_x,
            y: column.values.clone(),
            color: (*overlay_colors.next().unwrap_or(&OVERLAY_COLORS[0])).to_string(),
            width: 1.5,
            dash,
            fill: None,
        });
    }

    let aggregated = resample(&visible, display_cadence(series, opts));
    traces.push(Trace::Bar {
        name: "Volume".to_string(),
        panel: VOLUME_PANEL,
        x: aggregated.bars().iter().map(|b| b.timestamp).collect(),
        y: aggregated.bars().iter().map(|b| b.volume).collect(),
        colors: aggregated
            .bars()
            .iter()
            .map(|b| {
                if b.close >= b.open {
                    "rgba(26, 188, 156, 0.8)".to_string()
                } else {
                    "rgba(231, 76, 60, 0.8)".to_string()
                }
            })
            .collect(),
    });

    Figure {
        title: Some(title),
        panels: vec![
            Panel {
                y_title: "Price (USD)".to_string(),
                height_fraction: 0.8,
            },
            Panel {
                y_title: "Volume".to_string(),
                height_fraction: 0.2,
            },
        ],
        traces,
        annotations: Vec::new(),
        show_legend: opts.show_legend,
        x_range: opts.x_range,
    }
}

/// `sma_50` -> `SMA 50`, `ema_200` -> `EMA 200`.
fn display_name(key: &str) -> String {
    match key.split_once('_') {
        Some((kind, window)) => format!("{} {window}", kind.to_uppercase()),
        None => key.to_uppercase(),
    }
}
