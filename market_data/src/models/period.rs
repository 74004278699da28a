//! Named lookback windows over daily bars.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named lookback period selectable in the dashboard.
///
/// Each variant maps to a concrete number of calendar days, except
/// [`Period::All`], which means "everything the provider has".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    W1,
    W2,
    M1,
    M3,
    M6,
    Y1,
    Y2,
    Y3,
    Y5,
    All,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown period label: {0}")]
pub struct PeriodParseError(String);

impl Period {
    /// Lookback length in calendar days; `None` for the unbounded window.
    pub fn days(&self) -> Option<i64> {
        match self {
            Period::W1 => Some(7),
            Period::W2 => Some(14),
            Period::M1 => Some(30),
            Period::M3 => Some(90),
            Period::M6 => Some(180),
            Period::Y1 => Some(365),
            Period::Y2 => Some(2 * 365),
            Period::Y3 => Some(3 * 365),
            Period::Y5 => Some(5 * 365),
            Period::All => None,
        }
    }

    /// Short label used in widgets and cache keys.
    pub fn label(&self) -> &'static str {
        match self {
            Period::W1 => "1W",
            Period::W2 => "2W",
            Period::M1 => "1M",
            Period::M3 => "3M",
            Period::M6 => "6M",
            Period::Y1 => "1Y",
            Period::Y2 => "2Y",
            Period::Y3 => "3Y",
            Period::Y5 => "5Y",
            Period::All => "All",
        }
    }

    /// All periods in display order, shortest first.
    pub fn all() -> &'static [Period] {
        &[
            Period::W1,
            Period::W2,
            Period::M1,
            Period::M3,
            Period::M6,
            Period::Y1,
            Period::Y2,
            Period::Y3,
            Period::Y5,
            Period::All,
        ]
    }

    /// The smallest named period that covers a span of `days`.
    ///
    /// Used when a chart-zoom interaction reports a date window back and the
    /// shell needs to snap the period selector to something sensible.
    pub fn covering(days: i64) -> Period {
        Period::all()
            .iter()
            .copied()
            .find(|p| p.days().map(|d| days <= d).unwrap_or(true))
            .unwrap_or(Period::All)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Period::all()
            .iter()
            .copied()
            .find(|p| p.label().to_uppercase() == normalized)
            .ok_or_else(|| PeriodParseError(s.to_string()))
    }
}
