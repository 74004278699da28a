//! Interaction-loop state: the current selection plus the slider window.
//!
//! The shell owns one `ViewState` per open dashboard. Every handler mutates
//! the state and returns the recomputed [`DateRange`] so the surface can
//! re-render synchronously; `None` means the new series is empty and the
//! surface should show its empty state.

use data_shaping::range::{DateRange, IndexRange, reanchor, to_date_range, to_index_range};
use market_data::models::period::Period;
use market_data::models::series::Series;

pub struct ViewState {
    symbol: String,
    period: Period,
    range: IndexRange,
    series_len: usize,
    /// Period implied by the current window span; drives the volume
    /// cadence while a zoom is narrower than the selected period.
    effective_period: Period,
}

impl ViewState {
    /// Opens a view on `series` with the full window selected.
    pub fn new(symbol: &str, period: Period, series: &Series) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            period,
            range: IndexRange::full(series.len()),
            series_len: series.len(),
            effective_period: period,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// The period the window currently spans, which narrows as the user
    /// zooms in; the selected period is its upper bound.
    pub fn effective_period(&self) -> Period {
        self.effective_period
    }

    /// Switches symbols, keeping the window at the same relative position
    /// in the new series.
    pub fn set_symbol(&mut self, symbol: &str, series: &Series) -> Option<DateRange> {
        self.symbol = symbol.to_uppercase();
        self.range = reanchor(self.range, self.series_len, series.len());
        self.series_len = series.len();
        self.recompute_effective(series);
        to_date_range(series, self.range)
    }

    /// Switches periods and resets the window to the new full span.
    pub fn set_period(&mut self, period: Period, series: &Series) -> Option<DateRange> {
        self.period = period;
        self.effective_period = period;
        self.range = IndexRange::full(series.len());
        self.series_len = series.len();
        to_date_range(series, self.range)
    }

    /// Applies a slider drag: clamps the indices, recomputes the window's
    /// dates and the effective period.
    pub fn set_index_range(&mut self, range: IndexRange, series: &Series) -> Option<DateRange> {
        self.range = range.clamped(series.len());
        self.series_len = series.len();
        self.recompute_effective(series);
        to_date_range(series, self.range)
    }

    /// Applies a chart-zoom event by mapping the dates back to the nearest
    /// row indices.
    pub fn apply_zoom(&mut self, dates: DateRange, series: &Series) -> Option<DateRange> {
        let range = to_index_range(series, dates)?;
        self.set_index_range(range, series)
    }

    fn recompute_effective(&mut self, series: &Series) {
        self.effective_period = match to_date_range(series, self.range) {
            Some(dates) => {
                let spanned = (dates.end - dates.start).num_days().max(1);
                Period::covering(spanned)
            }
            None => self.period,
        };
    }
}
