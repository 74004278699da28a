//! Provider abstraction for market data sources.
//!
//! [`MarketDataProvider`] is the unified interface for fetching daily bar
//! history, whether from a remote API or a local snapshot file. The trait is
//! async and object-safe so the fetch coordinator can hold a
//! `Box<dyn MarketDataProvider>` selected at startup.

pub mod binance_rest;
pub mod errors;
pub mod snapshot;

use async_trait::async_trait;

use crate::models::{request::BarsRequest, series::Series};
use crate::providers::errors::ProviderError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the bar history described by `request`.
    ///
    /// Implementations return a validated [`Series`]; an empty series is a
    /// legal answer (unknown symbol with a permissive upstream), errors are
    /// for transport and contract failures.
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Series, ProviderError>;

    /// Short provider name for log lines.
    fn name(&self) -> &'static str;
}
