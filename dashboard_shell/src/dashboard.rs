//! The dashboard capability trait and the context handed to layouts.

use async_trait::async_trait;

use market_data::fetch::DataFetcher;
use market_data::models::period::Period;

use crate::config::AppConfig;
use crate::descriptor::DashboardDescriptor;
use crate::layout::Layout;

/// Everything a dashboard needs to build its layout: the data pipeline,
/// the application config, and the current selection.
pub struct DashboardContext {
    pub fetcher: DataFetcher,
    pub config: AppConfig,
    pub symbol: String,
    pub period: Period,
}

impl DashboardContext {
    pub fn new(fetcher: DataFetcher, config: AppConfig, symbol: &str, period: Period) -> Self {
        Self {
            fetcher,
            config,
            symbol: symbol.to_uppercase(),
            period,
        }
    }
}

/// A dashboard is anything that can describe itself and produce a layout.
///
/// Implementations hold no mutable state between calls; per-interaction
/// state lives in [`crate::view::ViewState`].
#[async_trait]
pub trait Dashboard: Send + Sync + std::fmt::Debug {
    fn descriptor(&self) -> DashboardDescriptor;

    /// Builds the full layout for the current context.
    async fn create_layout(&self, ctx: &DashboardContext) -> anyhow::Result<Layout>;

    /// Hook for dashboards that pre-warm data on a timer. Default: nothing.
    async fn refresh(&self, _ctx: &DashboardContext) -> anyhow::Result<()> {
        Ok(())
    }
}
