//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is the standard output of every
//! [`MarketDataProvider`](crate::providers::MarketDataProvider)
//! implementation, regardless of where the data came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single daily OHLCV bar for a given timestamp.
///
/// Vendor-agnostic; providers map their wire formats onto this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// The timestamp for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: f64,
}

/// A bar violates the OHLCV shape invariants.
#[derive(Debug, Error, PartialEq)]
pub enum BarError {
    #[error("bar at {timestamp} has non-finite price or volume")]
    NonFinite { timestamp: DateTime<Utc> },

    #[error("bar at {timestamp} has high {high} below max(open, close)")]
    HighTooLow { timestamp: DateTime<Utc>, high: f64 },

    #[error("bar at {timestamp} has low {low} above min(open, close)")]
    LowTooHigh { timestamp: DateTime<Utc>, low: f64 },

    #[error("bar at {timestamp} has negative volume {volume}")]
    NegativeVolume { timestamp: DateTime<Utc>, volume: f64 },
}

impl Bar {
    /// Checks the per-bar invariants: finite values, `high >= max(open, close)`,
    /// `low <= min(open, close)`, non-negative volume.
    pub fn validate(&self) -> Result<(), BarError> {
        let prices = [self.open, self.high, self.low, self.close, self.volume];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(BarError::NonFinite {
                timestamp: self.timestamp,
            });
        }
        if self.high < self.open.max(self.close) {
            return Err(BarError::HighTooLow {
                timestamp: self.timestamp,
                high: self.high,
            });
        }
        if self.low > self.open.min(self.close) {
            return Err(BarError::LowTooHigh {
                timestamp: self.timestamp,
                low: self.low,
            });
        }
        if self.volume < 0.0 {
            return Err(BarError::NegativeVolume {
                timestamp: self.timestamp,
                volume: self.volume,
            });
        }
        Ok(())
    }
}
