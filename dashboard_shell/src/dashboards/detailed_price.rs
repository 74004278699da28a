//! Two-panel analysis dashboard: detailed figure, indicator read-out,
//! trend signal, and the range-slider state.

use async_trait::async_trait;

use data_shaping::indicators::{IndicatorSet, compute_indicators};
use data_shaping::stats::{Trend, trend_signal};
use figure_builder::builders::DisplayOptions;
use figure_builder::detailed;

use crate::dashboard::{Dashboard, DashboardContext};
use crate::dashboards::{palette_from_config, shape_series, unavailable_pane};
use crate::descriptor::DashboardDescriptor;
use crate::layout::{Layout, Pane};
use crate::view::ViewState;

#[derive(Debug)]
pub struct DetailedPrice;

impl DetailedPrice {
    pub fn descriptor_static() -> DashboardDescriptor {
        DashboardDescriptor::new(
            "detailed_price",
            "Detailed Price",
            "Price and volume panels with moving-average overlays and a trend signal",
            "1.0.0",
            "cryptoboard",
        )
    }
}

#[async_trait]
impl Dashboard for DetailedPrice {
    fn descriptor(&self) -> DashboardDescriptor {
        Self::descriptor_static()
    }

    async fn create_layout(&self, ctx: &DashboardContext) -> anyhow::Result<Layout> {
        let mut layout = Layout::new(format!(
            "{} Detailed — {}",
            ctx.symbol,
            ctx.period.label()
        ));

        let series = match ctx.fetcher.fetch(&ctx.symbol, ctx.period).await {
            Ok(series) => series,
            Err(err) => {
                tracing::warn!(symbol = %ctx.symbol, %err, "rendering unavailable pane");
                layout.push(unavailable_pane(&ctx.symbol));
                return Ok(layout);
            }
        };
        let shaped = shape_series(&series, ctx.period, &ctx.config);
        let windows = &ctx.config.shaping.indicator_windows;

        let opts = DisplayOptions {
            palette: palette_from_config(&ctx.config),
            show_legend: true,
            ..DisplayOptions::default()
        };
        layout.push(Pane::figure(detailed(&shaped, &opts, windows)));

        let indicators = compute_indicators(&shaped, windows);
        layout.push(indicator_readout(&indicators, windows));
        if let [short, long, ..] = windows[..] {
            if let Some(trend) = trend_signal(&indicators, short, long) {
                layout.push(trend_pane(trend, short, long));
            }
        }

        let view = ViewState::new(&ctx.symbol, ctx.period, &shaped);
        layout.push(slider_pane(&view, shaped.len()));

        Ok(layout)
    }
}

fn indicator_readout(indicators: &IndicatorSet, windows: &[usize]) -> Pane {
    let mut tiles = Vec::new();
    for &window in windows {
        let sma = indicators
            .sma(window)
            .and_then(|c| c.last())
            .map_or_else(|| "warming up".to_string(), |v| format!("${v:.2}"));
        let ema = indicators
            .ema(window)
            .and_then(|c| c.last())
            .map_or_else(|| "warming up".to_string(), |v| format!("${v:.2}"));
        tiles.push(Pane::markdown(format!("**SMA {window}**\n\n{sma}")));
        tiles.push(Pane::markdown(format!("**EMA {window}**\n\n{ema}")));
    }
    Pane::row(tiles)
}

fn trend_pane(trend: Trend, short: usize, long: usize) -> Pane {
    let text = match trend {
        Trend::Bullish => format!("Trend: **bullish** (SMA {short} above SMA {long})"),
        Trend::Bearish => format!("Trend: **bearish** (SMA {short} below SMA {long})"),
    };
    Pane::markdown(text)
}

fn slider_pane(view: &ViewState, len: usize) -> Pane {
    let range = view.range();
    Pane::markdown(format!(
        "Window: rows {}–{} of {} ({})",
        range.start(),
        range.end(),
        len,
        view.effective_period().label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use data_shaping::range::IndexRange;
    use market_data::models::bar::Bar;
    use market_data::models::period::Period;
    use market_data::models::series::Series;

    fn daily_series(days: usize) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..days)
            .map(|i| Bar {
                timestamp: start + Duration::days(i as i64),
                open: 100.0,
                high: 110.0 + i as f64,
                low: 90.0,
                close: 100.0 + i as f64,
                volume: 1.0,
            })
            .collect();
        Series::new("BTC", bars).unwrap()
    }

    #[test]
    fn readout_covers_every_window() {
        let series = daily_series(60);
        let indicators = compute_indicators(&series, &[20, 50]);
        match indicator_readout(&indicators, &[20, 50]) {
            Pane::Row { children } => assert_eq!(children.len(), 4),
            other => panic!("expected a row, got {other:?}"),
        }
    }

    #[test]
    fn short_series_reads_as_warming_up() {
        let series = daily_series(10);
        let indicators = compute_indicators(&series, &[50]);
        match indicator_readout(&indicators, &[50]) {
            Pane::Row { children } => match &children[0] {
                Pane::Markdown { text } => assert!(text.contains("warming up")),
                other => panic!("expected markdown, got {other:?}"),
            },
            other => panic!("expected a row, got {other:?}"),
        }
    }

    #[test]
    fn slider_pane_reports_the_full_window() {
        let series = daily_series(30);
        let view = ViewState::new("BTC", Period::M1, &series);
        match slider_pane(&view, series.len()) {
            Pane::Markdown { text } => assert!(text.contains("rows 0–29 of 30")),
            other => panic!("expected markdown, got {other:?}"),
        }
    }

    #[test]
    fn window_sized_range_exists() {
        let series = daily_series(5);
        let view = ViewState::new("BTC", Period::W1, &series);
        assert_eq!(view.range(), IndexRange::full(5));
    }
}
