//! Read-mostly cache of fetched series.
//!
//! Readers load an `Arc<HashMap<..>>` snapshot with no locking; writers
//! rebuild the map and atomically swap it in. With one writer per
//! interaction and wholesale replacement on refresh, that is all the
//! coordination the dashboard needs.
//!
//! The cache is an owned object handed to the fetcher by reference, so its
//! lifetime is explicit and tests can construct as many as they like.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;

use crate::models::{period::Period, series::Series};

type CacheKey = (String, Period);

#[derive(Clone)]
struct CacheEntry {
    series: Arc<Series>,
    inserted_at: Instant,
}

pub struct SeriesCache {
    entries: ArcSwap<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl SeriesCache {
    /// A cache whose entries stay fresh for `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached series for (symbol, period) if it is still fresh.
    ///
    /// Stale entries are treated as absent; they are overwritten by the next
    /// insert rather than evicted eagerly.
    pub fn get(&self, symbol: &str, period: Period) -> Option<Arc<Series>> {
        let snapshot = self.entries.load();
        let entry = snapshot.get(&(symbol.to_uppercase(), period))?;
        if entry.inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(Arc::clone(&entry.series))
    }

    /// Stores a freshly fetched series, replacing the whole map snapshot.
    pub fn insert(&self, symbol: &str, period: Period, series: Arc<Series>) {
        let mut next: HashMap<CacheKey, CacheEntry> = self.entries.load().as_ref().clone();
        next.insert(
            (symbol.to_uppercase(), period),
            CacheEntry {
                series,
                inserted_at: Instant::now(),
            },
        );
        self.entries.store(Arc::new(next));
    }

    /// Drops everything. Useful for tests and a manual refresh action.
    pub fn clear(&self) {
        self.entries.store(Arc::new(HashMap::new()));
    }

    /// Number of entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
