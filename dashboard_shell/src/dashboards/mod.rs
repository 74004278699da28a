//! The built-in dashboards.

pub mod detailed_price;
pub mod market_overview;
pub mod simple_price;

pub use detailed_price::DetailedPrice;
pub use market_overview::MarketOverview;
pub use simple_price::SimplePrice;

use chrono::Utc;

use data_shaping::filter::filter_by_period;
use data_shaping::spikes::filter_spikes;
use figure_builder::palette::{Palette, SymbolColors};
use market_data::models::period::Period;
use market_data::models::series::Series;

use crate::config::AppConfig;
use crate::layout::Pane;

/// The shared shaping pipeline every dashboard runs on a fetched series:
/// window to the period, then drop data glitches.
pub(crate) fn shape_series(series: &Series, period: Period, config: &AppConfig) -> Series {
    let windowed = filter_by_period(series, period, Utc::now());
    filter_spikes(
        &windowed,
        config.shaping.spike_threshold,
        config.shaping.max_drop_fraction,
    )
}

/// Default palette with the config overrides layered on top.
pub(crate) fn palette_from_config(config: &AppConfig) -> Palette {
    let mut palette = Palette::default();
    for (symbol, colors) in &config.palette {
        palette.insert(
            symbol,
            SymbolColors {
                primary: colors.primary.clone(),
                secondary: colors.secondary.clone(),
            },
        );
    }
    palette
}

/// The pane shown in place of a symbol whose data could not be fetched.
pub(crate) fn unavailable_pane(symbol: &str) -> Pane {
    Pane::markdown(format!(
        "**{symbol}**: data unavailable — the API and the local snapshot both failed."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SymbolColorCfg;

    #[test]
    fn config_palette_overrides_defaults() {
        let mut config = AppConfig::default();
        config.palette.insert(
            "BTC".to_string(),
            SymbolColorCfg {
                primary: "#112233".to_string(),
                secondary: "#445566".to_string(),
            },
        );
        let palette = palette_from_config(&config);
        assert_eq!(palette.get("BTC").primary, "#112233");
        assert_eq!(palette.get("ETH").primary, "mediumpurple");
    }
}
