//! Application configuration: parsing, normalization, and loading.
//!
//! The TOML file drives everything tunable at runtime: which symbols and
//! periods the shell offers, API timeouts and retry counts, cache freshness,
//! spike-filter thresholds, indicator windows, the snapshot directory, and
//! per-symbol chart colors.
//!
//! Normalization trims whitespace, uppercases symbols, de-duplicates lists
//! while preserving order, and rejects out-of-range tunables. Entrypoints:
//! [`load_config_str`] and [`load_config_path`]; [`AppConfig::default`] is
//! the embedded configuration used when no file is given.

use std::collections::HashSet;
use std::mem;
use std::time::Duration;

use anyhow::{Context, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use toml::from_str;

use market_data::models::period::Period;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    /// Symbols offered in the symbol picker, uppercase after normalization.
    pub symbols: Vec<String>,
    /// Period labels offered in the period picker (e.g. "1m", "1y", "all").
    pub periods: Vec<String>,
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub shaping: ShapingConfig,
    /// Per-symbol primary/secondary chart colors; symbols not listed fall
    /// back to the built-in palette.
    pub palette: IndexMap<String, SymbolColorCfg>,
    /// Directory of `<SYMBOL>.csv` snapshot files used when the API fails.
    pub snapshot_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApiConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ShapingConfig {
    /// Relative change above which a bar is treated as a data glitch.
    pub spike_threshold: f64,
    /// Abort the spike filter when it would drop more than this share.
    pub max_drop_fraction: f64,
    /// Moving-average windows, in bars.
    pub indicator_windows: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolColorCfg {
    pub primary: String,
    pub secondary: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbols: ["BTC", "ETH", "BNB", "ADA", "SOL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            periods: ["1w", "1m", "3m", "6m", "1y", "all"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            shaping: ShapingConfig::default(),
            palette: IndexMap::new(),
            snapshot_dir: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            spike_threshold: 0.5,
            max_drop_fraction: 0.1,
            indicator_windows: vec![50, 200],
        }
    }
}

impl AppConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Configured periods parsed into [`Period`] values, in config order.
    pub fn period_choices(&self) -> anyhow::Result<Vec<Period>> {
        self.periods
            .iter()
            .map(|label| {
                label
                    .parse::<Period>()
                    .with_context(|| format!("invalid period label `{label}`"))
            })
            .collect()
    }
}

/// Trims, uppercases, de-duplicates, and validates a parsed config in place.
pub fn normalize_config(config: &mut AppConfig) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    let symbols = mem::take(&mut config.symbols);
    for raw in symbols {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            bail!("symbol cannot be empty after trimming");
        }
        if seen.insert(symbol.clone()) {
            config.symbols.push(symbol);
        }
    }
    if config.symbols.is_empty() {
        bail!("at least one symbol is required");
    }

    let mut seen = HashSet::new();
    let periods = mem::take(&mut config.periods);
    for raw in periods {
        let label = raw.trim().to_lowercase();
        label
            .parse::<Period>()
            .with_context(|| format!("invalid period label `{raw}`"))?;
        if seen.insert(label.clone()) {
            config.periods.push(label);
        }
    }
    if config.periods.is_empty() {
        bail!("at least one period is required");
    }

    let palette = mem::take(&mut config.palette);
    for (symbol, colors) in palette {
        let key = symbol.trim().to_uppercase();
        if key.is_empty() {
            bail!("palette symbol cannot be empty after trimming");
        }
        config.palette.insert(key, colors);
    }

    if config.api.timeout_secs == 0 {
        bail!("api.timeout_secs must be positive");
    }
    if !(0.0..=10.0).contains(&config.shaping.spike_threshold)
        || config.shaping.spike_threshold == 0.0
    {
        bail!("shaping.spike_threshold must be in (0, 10]");
    }
    if !(0.0..=1.0).contains(&config.shaping.max_drop_fraction) {
        bail!("shaping.max_drop_fraction must be in [0, 1]");
    }
    if config.shaping.indicator_windows.iter().any(|w| *w == 0) {
        bail!("shaping.indicator_windows entries must be positive");
    }

    Ok(())
}

/// Parses and normalizes a config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let mut config: AppConfig = from_str(toml_str).context("parse application config TOML")?;
    normalize_config(&mut config)?;
    Ok(config)
}

/// Parses and normalizes a config from a file path.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_normalize_cleanly() {
        let mut config = AppConfig::default();
        normalize_config(&mut config).unwrap();
        assert_eq!(config.symbols[0], "BTC");
        assert_eq!(config.shaping.indicator_windows, vec![50, 200]);
    }

    #[test]
    fn symbols_are_uppercased_and_deduped() {
        let config = load_config_str(
            r#"
            symbols = [" btc ", "eth", "BTC"]
            "#,
        )
        .unwrap();
        assert_eq!(config.symbols, vec!["BTC", "ETH"]);
    }

    #[test]
    fn bad_period_label_is_an_error() {
        let err = load_config_str(r#"periods = ["fortnight"]"#).unwrap_err();
        assert!(err.to_string().contains("fortnight"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(load_config_str("snapshots_dir = \"/tmp\"").is_err());
    }

    #[test]
    fn palette_keys_are_uppercased() {
        let config = load_config_str(
            r#"
            [palette.btc]
            primary = "orange"
            secondary = "gold"
            "#,
        )
        .unwrap();
        assert!(config.palette.contains_key("BTC"));
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "symbols = [\"doge\"]").unwrap();
        let config = load_config_path(file.path()).unwrap();
        assert_eq!(config.symbols, vec!["DOGE"]);
    }

    #[test]
    fn out_of_range_drop_fraction_is_rejected() {
        let err = load_config_str(
            r#"
            [shaping]
            max_drop_fraction = 1.5
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("max_drop_fraction"));
    }
}
