//! Filled line chart plus a summary-stats panel for one symbol.

use async_trait::async_trait;

use data_shaping::stats::{StatsError, SummaryStats, summary_stats};
use figure_builder::builders::DisplayOptions;
use figure_builder::price_line;

use crate::dashboard::{Dashboard, DashboardContext};
use crate::dashboards::{palette_from_config, shape_series, unavailable_pane};
use crate::descriptor::DashboardDescriptor;
use crate::layout::{Layout, Pane};

#[derive(Debug)]
pub struct SimplePrice;

impl SimplePrice {
    pub fn descriptor_static() -> DashboardDescriptor {
        DashboardDescriptor::new(
            "simple_price",
            "Simple Price",
            "Filled close-price line with summary statistics",
            "1.0.0",
            "cryptoboard",
        )
    }
}

#[async_trait]
impl Dashboard for SimplePrice {
    fn descriptor(&self) -> DashboardDescriptor {
        Self::descriptor_static()
    }

    async fn create_layout(&self, ctx: &DashboardContext) -> anyhow::Result<Layout> {
        let mut layout = Layout::new(format!("{} — {}", ctx.symbol, ctx.period.label()));

        let series = match ctx.fetcher.fetch(&ctx.symbol, ctx.period).await {
            Ok(series) => series,
            Err(err) => {
                tracing::warn!(symbol = %ctx.symbol, %err, "rendering unavailable pane");
                layout.push(unavailable_pane(&ctx.symbol));
                return Ok(layout);
            }
        };
        let shaped = shape_series(&series, ctx.period, &ctx.config);

        let opts = DisplayOptions {
            palette: palette_from_config(&ctx.config),
            ..DisplayOptions::default()
        };
        layout.push(Pane::figure(price_line(&shaped, &opts)));

        match summary_stats(&shaped) {
            Ok(stats) => layout.push(stats_row(&stats)),
            Err(StatsError::EmptySeries) => {
                layout.push(Pane::markdown("*No data for the selected period.*"))
            }
        }

        Ok(layout)
    }
}

fn stats_row(stats: &SummaryStats) -> Pane {
    let tile = |label: &str, value: String| Pane::markdown(format!("**{label}**\n\n{value}"));
    Pane::row(vec![
        tile("Last Close", format!("${:.2}", stats.last_close)),
        tile("Change", format!("{:+.2}%", stats.percent_change)),
        tile("Period High", format!("${:.2}", stats.period_high)),
        tile("Period Low", format!("${:.2}", stats.period_low)),
        tile("Volatility", format!("{:.2}%", stats.volatility)),
        tile("Avg Volume", format!("{:.0}", stats.avg_volume)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use market_data::models::bar::Bar;
    use market_data::models::series::Series;

    #[test]
    fn stats_row_has_six_tiles() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..5)
            .map(|i| Bar {
                timestamp: start + Duration::days(i),
                open: 100.0,
                high: 110.0,
                low: 90.0,
                close: 100.0 + i as f64,
                volume: 10.0,
            })
            .collect();
        let series = Series::new("BTC", bars).unwrap();
        let stats = summary_stats(&series).unwrap();
        match stats_row(&stats) {
            Pane::Row { children } => assert_eq!(children.len(), 6),
            other => panic!("expected a row, got {other:?}"),
        }
    }
}
