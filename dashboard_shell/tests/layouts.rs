//! End-to-end layout rendering against a stub provider.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use dashboard_shell::config::AppConfig;
use dashboard_shell::dashboard::{Dashboard, DashboardContext};
use dashboard_shell::dashboards::{DetailedPrice, MarketOverview, SimplePrice};
use dashboard_shell::layout::Pane;
use market_data::cache::SeriesCache;
use market_data::fetch::{DataFetcher, RetryPolicy};
use market_data::models::bar::Bar;
use market_data::models::period::Period;
use market_data::models::request::BarsRequest;
use market_data::models::series::Series;
use market_data::providers::MarketDataProvider;
use market_data::providers::errors::ProviderError;

/// Serves 120 deterministic daily bars for every symbol except `DEAD`.
struct StubProvider;

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Series, ProviderError> {
        if request.symbol == "DEAD" {
            return Err(ProviderError::Api("500 upstream".to_string()));
        }
        let start = request.now - ChronoDuration::days(120);
        let bars = (0..120)
            .map(|i| Bar {
                timestamp: start + ChronoDuration::days(i),
                open: 100.0 + i as f64,
                high: 110.0 + i as f64,
                low: 95.0 + i as f64,
                close: 105.0 + i as f64,
                volume: 10.0,
            })
            .collect();
        Series::new(&request.symbol, bars).map_err(ProviderError::from)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn context(symbols: &[&str]) -> DashboardContext {
    let fetcher = DataFetcher::new(
        Box::new(StubProvider),
        None,
        SeriesCache::new(Duration::from_secs(300)),
        RetryPolicy {
            max_retries: 0,
            base_delay: Duration::ZERO,
        },
    );
    let mut config = AppConfig::default();
    config.symbols = symbols.iter().map(|s| s.to_string()).collect();
    config.shaping.indicator_windows = vec![20, 50];
    DashboardContext::new(fetcher, config, symbols[0], Period::M3)
}

fn flatten<'a>(panes: &'a [Pane], out: &mut Vec<&'a Pane>) {
    for pane in panes {
        out.push(pane);
        if let Pane::Row { children } = pane {
            flatten(children, out);
        }
    }
}

fn markdown_texts(panes: &[Pane]) -> Vec<String> {
    let mut all = Vec::new();
    flatten(panes, &mut all);
    all.iter()
        .filter_map(|p| match p {
            Pane::Markdown { text } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn simple_price_renders_figure_and_stats() {
    let ctx = context(&["BTC"]);
    let layout = SimplePrice.create_layout(&ctx).await.unwrap();

    assert!(layout.title.contains("BTC"));
    assert!(matches!(layout.panes[0], Pane::Figure { .. }));
    let texts = markdown_texts(&layout.panes);
    assert!(texts.iter().any(|t| t.contains("Last Close")));
    assert!(texts.iter().any(|t| t.contains("Volatility")));
}

#[tokio::test]
async fn overview_keeps_going_past_a_dead_symbol() {
    let ctx = context(&["BTC", "DEAD", "ETH"]);
    let layout = MarketOverview.create_layout(&ctx).await.unwrap();

    let texts = markdown_texts(&layout.panes);
    assert!(texts.iter().any(|t| t.contains("DEAD") && t.contains("unavailable")));
    assert!(texts.iter().any(|t| t.contains("BTC")));

    // The comparison chart carries the two live symbols.
    let figure = layout
        .panes
        .iter()
        .find_map(|p| match p {
            Pane::Figure { figure } => Some(figure),
            _ => None,
        })
        .unwrap();
    assert_eq!(figure.traces.len(), 2);
}

#[tokio::test]
async fn detailed_price_includes_trend_and_window() {
    let ctx = context(&["ETH"]);
    let layout = DetailedPrice.create_layout(&ctx).await.unwrap();

    assert!(matches!(layout.panes[0], Pane::Figure { .. }));
    let texts = markdown_texts(&layout.panes);
    assert!(texts.iter().any(|t| t.contains("SMA 20")));
    // Monotone rising closes put the short SMA above the long one.
    assert!(texts.iter().any(|t| t.contains("bullish")));
    assert!(texts.iter().any(|t| t.starts_with("Window:")));
}

#[tokio::test]
async fn dead_symbol_renders_an_unavailable_pane() {
    let ctx = context(&["DEAD"]);
    let layout = SimplePrice.create_layout(&ctx).await.unwrap();
    let texts = markdown_texts(&layout.panes);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("unavailable"));
}
