//! Fetch coordination: cache, bounded retries, snapshot fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::SeriesCache;
use crate::models::{period::Period, request::BarsRequest, series::Series};
use crate::providers::{MarketDataProvider, errors::ProviderError};

/// Retry knobs for the remote provider: `max_retries` additional attempts
/// after the first, with exponential backoff starting at `base_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Both the remote provider and the snapshot fallback failed.
#[derive(Debug, Error)]
#[error("no data available for {symbol}: remote: {remote}; fallback: {fallback}")]
pub struct DataUnavailable {
    pub symbol: String,
    #[source]
    pub remote: ProviderError,
    pub fallback: String,
}

/// Resolves (symbol, period) requests against cache → remote → snapshot.
///
/// The cache is an explicit member with the fetcher's lifetime; every
/// successful resolution populates it so repeat interactions inside the
/// freshness window never touch the network.
pub struct DataFetcher {
    provider: Box<dyn MarketDataProvider>,
    fallback: Option<Box<dyn MarketDataProvider>>,
    cache: SeriesCache,
    retry: RetryPolicy,
}

impl DataFetcher {
    pub fn new(
        provider: Box<dyn MarketDataProvider>,
        fallback: Option<Box<dyn MarketDataProvider>>,
        cache: SeriesCache,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            fallback,
            cache,
            retry,
        }
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Fetches the series for `symbol` over `period`, serving from cache
    /// when fresh. Fails only when remote and fallback both fail.
    pub async fn fetch(&self, symbol: &str, period: Period) -> Result<Arc<Series>, DataUnavailable> {
        self.fetch_at(symbol, period, Utc::now()).await
    }

    /// [`DataFetcher::fetch`] with an explicit `now` anchor for tests.
    pub async fn fetch_at(
        &self,
        symbol: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<Arc<Series>, DataUnavailable> {
        if let Some(series) = self.cache.get(symbol, period) {
            debug!(symbol, period = period.label(), "serving cached series");
            return Ok(series);
        }

        let request = BarsRequest::new(symbol, period, now);

        let remote_err = match self.fetch_remote(&request).await {
            Ok(series) => {
                let series = Arc::new(series);
                self.cache.insert(symbol, period, Arc::clone(&series));
                return Ok(series);
            }
            Err(err) => err,
        };

        if let Some(fallback) = &self.fallback {
            match fallback.fetch_bars(&request).await {
                Ok(series) => {
                    warn!(
                        symbol,
                        source = fallback.name(),
                        "remote fetch failed, serving snapshot"
                    );
                    let series = Arc::new(series);
                    self.cache.insert(symbol, period, Arc::clone(&series));
                    return Ok(series);
                }
                Err(fallback_err) => {
                    return Err(DataUnavailable {
                        symbol: symbol.to_string(),
                        remote: remote_err,
                        fallback: fallback_err.to_string(),
                    });
                }
            }
        }

        Err(DataUnavailable {
            symbol: symbol.to_string(),
            remote: remote_err,
            fallback: "no snapshot fallback configured".to_string(),
        })
    }

    async fn fetch_remote(&self, request: &BarsRequest) -> Result<Series, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.provider.fetch_bars(request).await {
                Ok(series) => return Ok(series),
                Err(err) if attempt < self.retry.max_retries => {
                    let delay = self.retry.base_delay * 2u32.saturating_pow(attempt);
                    warn!(
                        symbol = %request.symbol,
                        provider = self.provider.name(),
                        attempt,
                        error = %err,
                        "remote fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
