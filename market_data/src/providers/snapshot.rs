//! Local CSV snapshot fallback.
//!
//! When the remote API is unreachable the fetcher falls back to per-symbol
//! snapshot files: `<dir>/<SYMBOL>.csv` with the columns
//! `Date,Open,High,Low,Close,Volume` and ISO dates.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};

use crate::models::{bar::Bar, request::BarsRequest, series::Series};
use crate::providers::{MarketDataProvider, errors::ProviderError};

pub struct SnapshotProvider {
    dir: PathBuf,
}

impl SnapshotProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.to_uppercase()))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for SnapshotProvider {
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Series, ProviderError> {
        let series = load_series_from_csv(&request.symbol, self.path_for(&request.symbol))?;

        // Snapshots hold full history; trim to the requested window here so
        // the fallback answers the same question the remote would have.
        let bars = match request.start() {
            Some(start) => series
                .bars()
                .iter()
                .copied()
                .filter(|b| b.timestamp >= start && b.timestamp <= request.now)
                .collect(),
            None => series.bars().to_vec(),
        };
        Ok(Series::new(&request.symbol, bars)?)
    }

    fn name(&self) -> &'static str {
        "snapshot"
    }
}

/// Reads one snapshot file into a validated series.
///
/// Column positions are resolved from the header row, so exports with extra
/// or reordered columns still load as long as the six named ones exist.
pub fn load_series_from_csv<P: AsRef<Path>>(
    symbol: &str,
    path: P,
) -> Result<Series, ProviderError> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| map_csv_error(e, path.as_ref()))?;

    let headers = reader
        .headers()
        .map_err(|e| map_csv_error(e, path.as_ref()))?
        .clone();
    let col = |name: &str| -> Result<usize, ProviderError> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ProviderError::Malformed(format!("snapshot missing column: {name}")))
    };
    let (date_col, open_col, high_col) = (col("Date")?, col("Open")?, col("High")?);
    let (low_col, close_col, volume_col) = (col("Low")?, col("Close")?, col("Volume")?);

    let mut bars = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| map_csv_error(e, path.as_ref()))?;
        let field = |idx: usize| -> Result<&str, ProviderError> {
            record
                .get(idx)
                .ok_or_else(|| ProviderError::Malformed("short snapshot row".to_string()))
        };

        let date = NaiveDate::parse_from_str(field(date_col)?, "%Y-%m-%d")
            .map_err(|e| ProviderError::Malformed(format!("bad snapshot date: {e}")))?;
        let timestamp = date.and_time(NaiveTime::MIN).and_utc();

        bars.push(Bar {
            timestamp,
            open: parse_field(field(open_col)?)?,
            high: parse_field(field(high_col)?)?,
            low: parse_field(field(low_col)?)?,
            close: parse_field(field(close_col)?)?,
            volume: parse_field(field(volume_col)?)?,
        });
    }

    Ok(Series::new(symbol, bars)?)
}

fn parse_field(raw: &str) -> Result<f64, ProviderError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ProviderError::Malformed(format!("non-numeric snapshot field: {raw:?}")))
}

fn map_csv_error(err: csv::Error, path: &Path) -> ProviderError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => ProviderError::Io(io),
            other => ProviderError::Malformed(format!("csv error reading {}: {other:?}", path.display())),
        }
    } else {
        ProviderError::Malformed(format!("csv error reading {}: {err}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use chrono::{Datelike, Utc};

    use crate::models::period::Period;

    const SNAPSHOT: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-01,100.0,110.0,95.0,105.0,1000
2024-01-02,105.0,112.0,101.0,108.0,900
2024-01-03,108.0,115.0,104.0,111.0,1100
";

    fn write_snapshot(dir: &Path, symbol: &str, body: &str) {
        let mut f = std::fs::File::create(dir.join(format!("{symbol}.csv"))).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn loads_header_mapped_csv() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "BTC", SNAPSHOT);

        let series = load_series_from_csv("BTC", dir.path().join("BTC.csv")).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.bars()[0].timestamp.day(), 1);
        assert_eq!(series.bars()[2].close, 111.0);
    }

    #[test]
    fn missing_column_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "BTC", "Date,Open,High,Low,Close\n2024-01-01,1,1,1,1\n");

        let err = load_series_from_csv("BTC", dir.path().join("BTC.csv")).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_series_from_csv("BTC", dir.path().join("BTC.csv")).unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[tokio::test]
    async fn provider_trims_to_requested_window() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "BTC", SNAPSHOT);

        let provider = SnapshotProvider::new(dir.path());
        // A window that only covers the newest row.
        let now = Utc::now();
        let request = BarsRequest::new("BTC", Period::All, now);
        let series = provider.fetch_bars(&request).await.unwrap();
        assert_eq!(series.len(), 3);
    }
}
