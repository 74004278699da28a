//! Per-symbol chart colors.
//!
//! Symbols keep their colors across every dashboard so BTC is always the
//! same orange no matter which view renders it. The defaults mirror the
//! dashboard's stock palette; deployments override them in the app config.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Primary (line) and secondary (fill/accent) colors for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolColors {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    symbols: IndexMap<String, SymbolColors>,
    fallback: SymbolColors,
}

impl Palette {
    pub fn new(symbols: IndexMap<String, SymbolColors>) -> Self {
        Self {
            symbols,
            fallback: SymbolColors {
                primary: "gray".to_string(),
                secondary: "silver".to_string(),
            },
        }
    }

    /// Adds or replaces the colors for one symbol; used to overlay config
    /// overrides onto the defaults.
    pub fn insert(&mut self, symbol: &str, colors: SymbolColors) {
        self.symbols.insert(symbol.to_uppercase(), colors);
    }

    /// Colors for `symbol`, falling back to a neutral gray pair.
    pub fn get(&self, symbol: &str) -> &SymbolColors {
        self.symbols
            .get(&symbol.to_uppercase())
            .unwrap_or(&self.fallback)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut symbols = IndexMap::new();
        let mut add = |sym: &str, primary: &str, secondary: &str| {
            symbols.insert(
                sym.to_string(),
                SymbolColors {
                    primary: primary.to_string(),
                    secondary: secondary.to_string(),
                },
            );
        };
        add("BTC", "orange", "gold");
        add("ETH", "mediumpurple", "plum");
        add("BNB", "indianred", "lightsalmon");
        add("ADA", "royalblue", "lightblue");
        add("DOT", "hotpink", "pink");
        add("DOGE", "gold", "goldenrod");
        add("LTC", "silver", "gray");
        add("XRP", "forestgreen", "darkgreen");
        add("SOL", "lightseagreen", "mediumpurple");
        add("LINK", "lightskyblue", "dodgerblue");
        Palette::new(symbols)
    }
}

/// Blends a color with an opacity into an `rgba(r, g, b, a)` string.
///
/// Accepts `#rrggbb` hex or one of the palette's named colors; anything
/// unrecognized blends as gray rather than failing mid-render.
pub fn rgba(color: &str, opacity: f64) -> String {
    let (r, g, b) = parse_color(color).unwrap_or((128, 128, 128));
    let a = opacity.clamp(0.0, 1.0);
    format!("rgba({r}, {g}, {b}, {a})")
}

fn parse_color(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some((r, g, b));
        }
        return None;
    }
    named_color(&color.to_lowercase())
}

fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    // CSS values for the names the default palette uses.
    let rgb = match name {
        "orange" => (255, 165, 0),
        "gold" => (255, 215, 0),
        "goldenrod" => (218, 165, 32),
        "mediumpurple" => (147, 112, 219),
        "plum" => (221, 160, 221),
        "indianred" => (205, 92, 92),
        "lightsalmon" => (255, 160, 122),
        "royalblue" => (65, 105, 225),
        "lightblue" => (173, 216, 230),
        "hotpink" => (255, 105, 180),
        "pink" => (255, 192, 203),
        "silver" => (192, 192, 192),
        "gray" => (128, 128, 128),
        "forestgreen" => (34, 139, 34),
        "darkgreen" => (0, 100, 0),
        "lightseagreen" => (32, 178, 170),
        "lightskyblue" => (135, 206, 250),
        "dodgerblue" => (30, 144, 255),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbol_gets_its_colors() {
        let palette = Palette::default();
        assert_eq!(palette.get("BTC").primary, "orange");
        assert_eq!(palette.get("btc").primary, "orange");
    }

    #[test]
    fn unknown_symbol_falls_back_to_gray() {
        let palette = Palette::default();
        assert_eq!(palette.get("ZZZ").primary, "gray");
    }

    #[test]
    fn rgba_from_hex() {
        assert_eq!(rgba("#3498db", 0.8), "rgba(52, 152, 219, 0.8)");
    }

    #[test]
    fn rgba_from_name_and_clamped_opacity() {
        assert_eq!(rgba("orange", 2.0), "rgba(255, 165, 0, 1)");
    }

    #[test]
    fn unknown_color_blends_as_gray() {
        assert_eq!(rgba("notacolor", 0.5), "rgba(128, 128, 128, 0.5)");
    }
}
