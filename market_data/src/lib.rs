//! Market data access for the dashboard: canonical OHLCV models, a provider
//! abstraction over remote APIs and local snapshots, a TTL'd series cache,
//! and the retrying fetch coordinator that ties them together.
//!
//! Data flows one direction: a [`fetch::DataFetcher`] resolves a
//! (symbol, period) request against the cache, the remote provider, and the
//! snapshot fallback, in that order, and hands back an immutable
//! [`models::series::Series`] for the shaping layer.

pub mod cache;
pub mod fetch;
pub mod models;
pub mod providers;
