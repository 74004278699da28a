//! Mapping between slider row indices and date ranges.
//!
//! The range slider operates over integer row indices so drag granularity
//! stays uniform (one unit per bar) no matter how long the visible span is.
//! Dates are always recomputed from the series a range was derived from;
//! they are never stored on their own, which is what keeps a symbol or
//! period switch from rendering stale windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use market_data::models::series::Series;

/// An ordered pair of row indices into a series (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    start: usize,
    end: usize,
}

/// The timestamps a slider window maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl IndexRange {
    /// Builds a range, swapping the endpoints when they arrive inverted
    /// (drag direction is not the slider's problem).
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// The full window over a series of `len` rows.
    pub fn full(len: usize) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Clamps both endpoints into `[0, len - 1]`.
    pub fn clamped(&self, len: usize) -> Self {
        let max = len.saturating_sub(1);
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }
}

/// Looks up the timestamps for a slider window, clamping out-of-bounds
/// indices instead of failing. `None` only for an empty series.
pub fn to_date_range(series: &Series, range: IndexRange) -> Option<DateRange> {
    if series.is_empty() {
        return None;
    }
    let clamped = range.clamped(series.len());
    Some(DateRange {
        start: series.bars()[clamped.start].timestamp,
        end: series.bars()[clamped.end].timestamp,
    })
}

/// Reverse mapping for chart-zoom events: nearest row index for each end of
/// a date window. `None` only for an empty series.
pub fn to_index_range(series: &Series, range: DateRange) -> Option<IndexRange> {
    if series.is_empty() {
        return None;
    }
    let (start, end) = if range.start <= range.end {
        (range.start, range.end)
    } else {
        (range.end, range.start)
    };
    Some(IndexRange::new(
        nearest_index(series, start),
        nearest_index(series, end),
    ))
}

/// Index of the bar whose timestamp is closest to `ts` (binary search over
/// the sorted timestamps, then compare the two neighbors).
fn nearest_index(series: &Series, ts: DateTime<Utc>) -> usize {
    let bars = series.bars();
    let insertion = bars.partition_point(|bar| bar.timestamp < ts);
    if insertion == 0 {
        return 0;
    }
    if insertion >= bars.len() {
        return bars.len() - 1;
    }
    let before = ts - bars[insertion - 1].timestamp;
    let after = bars[insertion].timestamp - ts;
    if after < before { insertion } else { insertion - 1 }
}

/// Proportionally re-anchors a window after the underlying series changed
/// length (symbol or period switch): a 10%–20% window stays a 10%–20%
/// window instead of jumping to unrelated absolute indices.
pub fn reanchor(range: IndexRange, old_len: usize, new_len: usize) -> IndexRange {
    if old_len == 0 || new_len == 0 {
        return IndexRange::full(new_len);
    }
    let scale = |idx: usize| -> usize {
        let fraction = idx as f64 / old_len as f64;
        ((fraction * new_len as f64).round() as usize).min(new_len - 1)
    };
    IndexRange::new(scale(range.start), scale(range.end))
}
