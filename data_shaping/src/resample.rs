//! Aggregation of daily bars into coarser display buckets.
//!
//! Long spans render as weekly or monthly bars so volume panels stay
//! readable. Volume is summed within a bucket, never averaged.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;

use market_data::models::{bar::Bar, series::Series};

/// Display cadence for resampled views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    /// Cadence for a visible span: up to ~3 months of daily bars, up to
    /// ~2 years weekly, anything longer monthly.
    pub fn for_span_days(days: i64) -> Cadence {
        if days <= 93 {
            Cadence::Daily
        } else if days <= 730 {
            Cadence::Weekly
        } else {
            Cadence::Monthly
        }
    }

    /// Cadence for the span actually covered by `series`.
    pub fn for_series(series: &Series) -> Cadence {
        match (series.first_timestamp(), series.last_timestamp()) {
            (Some(first), Some(last)) => Cadence::for_span_days((last - first).num_days()),
            _ => Cadence::Daily,
        }
    }
}

/// Aggregates bars into `cadence` buckets: open = first, close = last,
/// high = max, low = min, volume = sum. Bucket timestamps are the bucket
/// start (Monday for weeks, the 1st for months).
pub fn resample(series: &Series, cadence: Cadence) -> Series {
    if series.is_empty() || cadence == Cadence::Daily {
        return series.clone();
    }

    let mut aggregated: Vec<Bar> = Vec::new();
    let mut current: Option<Bar> = None;

    for bar in series.bars() {
        let bucket = bucket_start(bar.timestamp, cadence);
        match &mut current {
            Some(acc) if acc.timestamp == bucket => {
                acc.high = acc.high.max(bar.high);
                acc.low = acc.low.min(bar.low);
                acc.close = bar.close;
                acc.volume += bar.volume;
            }
            _ => {
                if let Some(done) = current.take() {
                    aggregated.push(done);
                }
                current = Some(Bar {
                    timestamp: bucket,
                    ..*bar
                });
            }
        }
    }
    if let Some(done) = current {
        aggregated.push(done);
    }

    Series::from_ordered_bars(series.symbol(), aggregated)
}

fn bucket_start(ts: DateTime<Utc>, cadence: Cadence) -> DateTime<Utc> {
    let date = ts.date_naive();
    let bucket_date = match cadence {
        Cadence::Daily => date,
        Cadence::Weekly => date - Duration::days(date.weekday().num_days_from_monday() as i64),
        Cadence::Monthly => date.with_day(1).unwrap_or(date),
    };
    bucket_date.and_time(NaiveTime::MIN).and_utc()
}
