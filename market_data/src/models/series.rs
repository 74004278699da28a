//! An ordered, validated collection of bars for a single symbol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::bar::{Bar, BarError};

/// A complete set of daily bars for one symbol, oldest first.
///
/// Construction validates the ordering and per-bar invariants, so downstream
/// shaping code can rely on strictly increasing timestamps. A `Series` is
/// never mutated after a fetch; refreshes replace it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error(transparent)]
    Bar(#[from] BarError),

    #[error("bars for {symbol} not strictly increasing at {timestamp}")]
    OutOfOrder {
        symbol: String,
        timestamp: DateTime<Utc>,
    },
}

impl Series {
    /// Builds a series, validating every bar and the timestamp ordering.
    ///
    /// Duplicate timestamps count as out of order: the invariant is strictly
    /// increasing, no ties.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        for bar in &bars {
            bar.validate()?;
        }
        for pair in bars.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SeriesError::OutOfOrder {
                    symbol,
                    timestamp: pair[1].timestamp,
                });
            }
        }
        Ok(Self { symbol, bars })
    }

    /// An empty series for `symbol`. Useful as a graceful placeholder.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.first().map(|b| b.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.last().map(|b| b.timestamp)
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    /// Rebuilds a series from a subset of this one's bars.
    ///
    /// The bars are assumed to come from `self` in order, so the ordering
    /// invariant is preserved without re-validation.
    pub(crate) fn with_bars(&self, bars: Vec<Bar>) -> Self {
        Self {
            symbol: self.symbol.clone(),
            bars,
        }
    }

    /// Builds a series from bars the caller guarantees are valid and
    /// strictly increasing — aggregation and filtering outputs whose
    /// invariants hold by construction. Checked in debug builds only.
    pub fn from_ordered_bars(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|p| p[1].timestamp > p[0].timestamp),
            "from_ordered_bars given unordered bars"
        );
        Self {
            symbol: symbol.into(),
            bars,
        }
    }
}

/// Re-slicing helper for the shaping crate: builds a series from bars known
/// to come, in order, from an already-validated series.
pub fn subseries(parent: &Series, bars: Vec<Bar>) -> Series {
    parent.with_bars(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar_at(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn ordered_bars_accepted() {
        let s = Series::new("BTC", vec![bar_at(1, 100.0), bar_at(2, 101.0)]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.symbol(), "BTC");
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let err = Series::new("BTC", vec![bar_at(1, 100.0), bar_at(1, 101.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn unordered_bars_rejected() {
        let err = Series::new("BTC", vec![bar_at(2, 100.0), bar_at(1, 101.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn invalid_bar_surfaces_as_series_error() {
        let mut bad = bar_at(1, 100.0);
        bad.high = 90.0;
        assert!(Series::new("BTC", vec![bad]).is_err());
    }

    #[test]
    fn empty_series_is_valid() {
        let s = Series::empty("ETH");
        assert!(s.is_empty());
        assert_eq!(s.first_timestamp(), None);
    }
}
