//! Provider-agnostic request for a symbol's bar history.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::period::Period;

/// Parameters for requesting daily bars from any market data provider.
///
/// The `now` anchor is carried explicitly so that period arithmetic is
/// reproducible in tests; production callers pass `Utc::now()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarsRequest {
    /// Canonical symbol, e.g. `"BTC"`.
    pub symbol: String,

    /// Lookback window the caller is interested in.
    pub period: Period,

    /// End of the requested range (inclusive).
    pub now: DateTime<Utc>,
}

impl BarsRequest {
    pub fn new(symbol: impl Into<String>, period: Period, now: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            now,
        }
    }

    /// Start of the requested range, or `None` for an unbounded lookback.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.period.days().map(|d| self.now - Duration::days(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_derives_from_period() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let req = BarsRequest::new("BTC", Period::M1, now);
        assert_eq!(req.start(), Some(now - Duration::days(30)));

        let req = BarsRequest::new("BTC", Period::All, now);
        assert_eq!(req.start(), None);
    }
}
