use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use dashboard_shell::config::{AppConfig, load_config_path};
use dashboard_shell::dashboard::DashboardContext;
use dashboard_shell::registry::DashboardRegistry;
use market_data::cache::SeriesCache;
use market_data::fetch::{DataFetcher, RetryPolicy};
use market_data::models::period::Period;
use market_data::providers::MarketDataProvider;
use market_data::providers::binance_rest::BinanceProvider;
use market_data::providers::snapshot::SnapshotProvider;

#[derive(Parser)]
#[command(version, about = "Crypto dashboard shell")]
struct Cli {
    /// Path to a TOML config file; embedded defaults when omitted.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List the registered dashboards.
    List,
    /// Render one dashboard's layout as JSON.
    Render {
        #[arg(long)]
        dashboard: String,
        /// Symbol to render; defaults to the first configured symbol.
        #[arg(long)]
        symbol: Option<String>,
        /// Period label, e.g. "1m", "1y", "all".
        #[arg(long, default_value = "1y")]
        period: String,
        /// Write the layout JSON here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => AppConfig::default(),
    };
    let registry = DashboardRegistry::builtin();

    match cli.cmd {
        Cmd::List => {
            for entry in registry.list() {
                let d = &entry.descriptor;
                println!(
                    "{:<20} {:<24} v{:<8} {}",
                    d.name, d.display_name, d.version, d.description
                );
            }
        }
        Cmd::Render {
            dashboard,
            symbol,
            period,
            out,
        } => {
            let period: Period = period
                .parse()
                .with_context(|| format!("invalid period `{period}`"))?;
            let symbol = symbol
                .map(|s| s.to_uppercase())
                .or_else(|| config.symbols.first().cloned())
                .context("no symbol given and none configured")?;

            let fetcher = build_fetcher(&config)?;
            let ctx = DashboardContext::new(fetcher, config, &symbol, period);
            let instance = registry.instantiate(&dashboard)?;

            info!(%dashboard, %symbol, period = period.label(), "rendering layout");
            let layout = instance.create_layout(&ctx).await?;
            let json = serde_json::to_string_pretty(&layout)?;
            match out {
                Some(path) => tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("write layout to {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn build_fetcher(config: &AppConfig) -> Result<DataFetcher> {
    let provider = BinanceProvider::new(config.api_timeout()).context("build API client")?;
    let fallback: Option<Box<dyn MarketDataProvider>> = config
        .snapshot_dir
        .as_ref()
        .map(|dir| Box::new(SnapshotProvider::new(dir)) as Box<dyn MarketDataProvider>);
    let retry = RetryPolicy {
        max_retries: config.api.max_retries,
        base_delay: Duration::from_secs(1),
    };
    Ok(DataFetcher::new(
        Box::new(provider),
        fallback,
        SeriesCache::new(config.cache_ttl()),
        retry,
    ))
}
