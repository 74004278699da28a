//! Traded-volume bars, aggregated to a cadence that fits the visible span.

use data_shaping::resample::resample;
use market_data::models::series::Series;

use crate::builders::{DisplayOptions, NO_DATA_MESSAGE, display_cadence, visible_slice};
use crate::figure::{Figure, Panel, Trace};

const UP_COLOR: &str = "rgba(26, 188, 156, 0.8)";
const DOWN_COLOR: &str = "rgba(231, 76, 60, 0.8)";

/// Builds a volume bar chart. Bars are colored by the direction of each
/// aggregated bucket (close vs. open).
pub fn volume(series: &Series, opts: &DisplayOptions) -> Figure {
    let title = opts
        .title
        .clone()
        .unwrap_or_else(|| format!("{} Trading Volume", series.symbol()));

    let visible = visible_slice(series, opts);
    if visible.is_empty() {
        return Figure::empty_state(Some(title), NO_DATA_MESSAGE);
    }

    let aggregated = resample(&visible, display_cadence(series, opts));

    let bars = aggregated.bars();

    let trace = Trace::Bar {
        name: "Volume".to_string(),
        panel: 0,
        x: bars.iter().map(|b| b.timestamp).collect(),
        y: bars.iter().map(|b| b.volume).collect(),
        colors: bars
            .iter()
            .map(|b| {
                if b.close >= b.open {
                    UP_COLOR.to_string()
                } else {
                    DOWN_COLOR.to_string()
                }
            })
            .collect(),
    };

    Figure {
        title: Some(title),
        panels: vec![Panel {
            y_title: "Volume".to_string(),
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

    fn daily_series(days: usize, volume: f64) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..days)
            .map(|i| Bar {
                timestamp: start + Duration::days(i as i64),
                open: 100.0,
                high: 110.0,
                low: 95.0,
                close: 105.0,
                volume,
            })
            .collect();
        Series::new("BTC", bars).unwrap()
    }

    #[test]
    fn short_span_keeps_daily_bars() {
        let fig = volume(&daily_series(10, 3.0), &DisplayOptions::default());
        match &fig.traces[0] {
            Trace::Bar { x, y, colors, .. } => {
                assert_eq!(x.len(), 10);
                assert!(y.iter().all(|v| *v == 3.0));
                assert!(colors.iter().all(|c| c == UP_COLOR));
            }
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn long_span_sums_volume_per_bucket() {
        // 180 days crosses the weekly threshold, so buckets hold up to
        // seven days of volume each.
        let fig = volume(&daily_series(180, 1.0), &DisplayOptions::default());
        match &fig.traces[0] {
            Trace::Bar { x, y, .. } => {
                assert!(x.len() < 180);
                let total: f64 = y.iter().sum();
                assert_eq!(total, 180.0);
                assert!(y.iter().any(|v| *v == 7.0));
            }
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn cadence_follows_the_visible_window_not_the_full_series() {
        // 800 days alone would aggregate monthly, but a 10-day window
        // keeps daily bars.
        let series = daily_series(800, 1.0);
        let opts = DisplayOptions {
            x_range: Some((series.bars()[0].timestamp, series.bars()[10].timestamp)),
            ..DisplayOptions::default()
        };
        let fig = volume(&series, &opts);
        match &fig.traces[0] {
            Trace::Bar { x, .. } => assert_eq!(x.len(), 11),
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn down_buckets_use_the_down_color() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = vec![Bar {
            timestamp: start,
            open: 100.0,
            high: 100.0,
            low: 90.0,
            close: 90.0,
            volume: 2.0,
        }];
        let series = Series::new("BTC", bars).unwrap();
        let fig = volume(&series, &DisplayOptions::default());
        match &fig.traces[0] {
            Trace::Bar { colors, .. } => assert_eq!(colors[0], DOWN_COLOR),
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn empty_series_yields_placeholder() {
        let fig = volume(&Series::empty("BTC"), &DisplayOptions::default());
        assert!(fig.is_empty());
    }
}
