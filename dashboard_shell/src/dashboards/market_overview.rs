//! Side-by-side view of every configured symbol: stat tiles plus a
//! normalized comparison chart.

use async_trait::async_trait;

use data_shaping::stats::summary_stats;
use figure_builder::figure::{Dash, Figure, Panel, Trace};
use figure_builder::palette::rgba;
use market_data::models::series::Series;

use crate::dashboard::{Dashboard, DashboardContext};
use crate::dashboards::{palette_from_config, shape_series, unavailable_pane};
use crate::descriptor::DashboardDescriptor;
use crate::layout::{Layout, Pane};

#[derive(Debug)]
pub struct MarketOverview;

impl MarketOverview {
    pub fn descriptor_static() -> DashboardDescriptor {
        DashboardDescriptor::new(
            "market_overview",
            "Market Overview",
            "Stat tiles and a normalized comparison across all configured symbols",
            "1.0.0",
            "cryptoboard",
        )
    }
}

#[async_trait]
impl Dashboard for MarketOverview {
    fn descriptor(&self) -> DashboardDescriptor {
        Self::descriptor_static()
    }

    async fn create_layout(&self, ctx: &DashboardContext) -> anyhow::Result<Layout> {
        let mut layout = Layout::new(format!("Market Overview — {}", ctx.period.label()));
        let palette = palette_from_config(&ctx.config);

        let mut tiles = Vec::new();
        let mut shaped: Vec<Series> = Vec::new();
        for symbol in &ctx.config.symbols {
            match ctx.fetcher.fetch(symbol, ctx.period).await {
                Ok(series) => {
                    let series = shape_series(&series, ctx.period, &ctx.config);
                    tiles.push(symbol_tile(&series, symbol));
                    if !series.is_empty() {
                        shaped.push(series);
                    }
                }
                Err(err) => {
                    // One dead symbol must not take the overview down.
                    tracing::warn!(%symbol, %err, "symbol unavailable in overview");
                    tiles.push(unavailable_pane(symbol));
                }
            }
        }

        layout.push(Pane::row(tiles));
        layout.push(Pane::Divider);

        let traces: Vec<Trace> = shaped
            .iter()
            .filter_map(|series| {
                let colors = palette.get(series.symbol());
                normalized_trace(series, &rgba(&colors.primary, 0.9))
            })
            .collect();

        let figure = if traces.is_empty() {
            Figure::empty_state(Some("Relative Performance".to_string()), "No data available")
        } else {
            Figure {
                title: Some("Relative Performance (first close = 100)".to_string()),
                panels: vec![Panel {
                    y_title: "Index".to_string(),
                    height_fraction: 1.0,
                }],
                traces,
                annotations: Vec::new(),
                show_legend: true,
                x_range: None,
            }
        };
        layout.push(Pane::figure(figure));

        Ok(layout)
    }
}

/// Close prices rebased so every symbol starts at 100, which is the only
/// way BTC and DOGE share one y-axis.
fn normalized_trace(series: &Series, color: &str) -> Option<Trace> {
    let bars = series.bars();
    let base = bars.first().map(|b| b.close)?;
    if base == 0.0 {
        return None;
    }
    Some(Trace::Line {
        name: series.symbol().to_string(),
        panel: 0,
        x: bars.iter().map(|b| b.timestamp).collect(),
        y: bars.iter().map(|b| b.close / base * 100.0).collect(),
        color: color.to_string(),
        width: 2.0,
        dash: Dash::Solid,
        fill: None,
    })
}

fn symbol_tile(series: &Series, symbol: &str) -> Pane {
    match summary_stats(series) {
        Ok(stats) => Pane::markdown(format!(
            "**{symbol}**\n\n${:.2} ({:+.2}%)",
            stats.last_close, stats.percent_change
        )),
        Err(_) => Pane::markdown(format!("**{symbol}**\n\n*no data in period*")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use market_data::models::bar::Bar;

    fn series_with_closes(closes: &[f64]) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| Bar {
                timestamp: start + Duration::days(i as i64),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 1.0,
            })
            .collect();
        Series::new("BTC", bars).unwrap()
    }

    #[test]
    fn normalization_rebases_to_one_hundred() {
        let series = series_with_closes(&[50.0, 75.0, 100.0]);
        match normalized_trace(&series, "gray").unwrap() {
            Trace::Line { y, .. } => assert_eq!(y, vec![100.0, 150.0, 200.0]),
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn zero_base_close_yields_no_trace() {
        let series = series_with_closes(&[0.0, 1.0]);
        assert!(normalized_trace(&series, "gray").is_none());
    }

    #[test]
    fn empty_series_tile_shows_a_placeholder() {
        let tile = symbol_tile(&Series::empty("BTC"), "BTC");
        match tile {
            Pane::Markdown { text } => assert!(text.contains("no data")),
            other => panic!("expected markdown, got {other:?}"),
        }
    }
}
