//! Binance spot REST provider for daily klines.
//!
//! Maps the `/api/v3/klines` endpoint onto the canonical [`Series`] model.
//! Requests are paced through a process-local rate limiter and paginated
//! with a `startTime` cursor, 1000 bars per page.
//!
//! An unbounded lookback ([`Period::All`](crate::models::period::Period::All))
//! has no start cursor to paginate
//! from, so it returns the single most recent page: at most 1000 daily bars
//! (short of three years). Bounded periods paginate to full depth, so a
//! five-year request can legitimately return more history than "All".

use chrono::{DateTime, TimeZone, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_optional_env_var;

use crate::models::{bar::Bar, request::BarsRequest, series::Series};
use crate::providers::{
    MarketDataProvider,
    errors::{ProviderError, ProviderInitError},
};

const DEFAULT_BASE_URL: &str = "https://api.binance.us/api/v3";
const PAGE_LIMIT: usize = 1000;
const API_KEY_VAR: &str = "BINANCE_API_KEY";

/// One kline row as Binance returns it: a 12-element heterogeneous array.
///
/// `[open_time, open, high, low, close, volume, close_time, quote_volume,
///   trade_count, taker_base, taker_quote, unused]`
type RawKline = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    u64,
    String,
    String,
    String,
);

pub struct BinanceProvider {
    client: Client,
    base_url: String,
    quote_asset: String,
    limiter: DefaultDirectRateLimiter,
    _api_key: Option<SecretString>,
}

impl BinanceProvider {
    /// Creates a provider against the public Binance API.
    ///
    /// An API key is optional for kline data; when the `BINANCE_API_KEY`
    /// environment variable is set it is sent as the `X-MBX-APIKEY` header.
    pub fn new(timeout: std::time::Duration) -> Result<Self, ProviderInitError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Same as [`BinanceProvider::new`] with an explicit base URL, for tests
    /// and regional mirrors.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ProviderInitError> {
        let api_key = get_optional_env_var(API_KEY_VAR).map(|k| SecretString::new(k.into()));

        let mut headers = header::HeaderMap::new();
        if let Some(key) = &api_key {
            headers.insert(
                "X-MBX-APIKEY",
                header::HeaderValue::from_str(key.expose_secret())?,
            );
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            quote_asset: "USDT".to_string(),
            // Spot market data allows far more, but the dashboard never needs
            // bursts beyond a handful of pages per interaction.
            limiter: RateLimiter::direct(Quota::per_second(nonzero!(5u32))),
            _api_key: api_key,
        })
    }

    fn remote_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol.to_uppercase(), self.quote_asset)
    }

    async fn fetch_page(
        &self,
        remote_symbol: &str,
        start_ms: Option<i64>,
        end_ms: i64,
    ) -> Result<Vec<RawKline>, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/klines", self.base_url);
        let mut query: Vec<(String, String)> = vec![
            ("symbol".into(), remote_symbol.to_string()),
            ("interval".into(), "1d".into()),
            ("limit".into(), PAGE_LIMIT.to_string()),
            ("endTime".into(), end_ms.to_string()),
        ];
        if let Some(start) = start_ms {
            query.push(("startTime".into(), start.to_string()));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(error_msg));
        }

        Ok(response.json::<Vec<RawKline>>().await?)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BinanceProvider {
    async fn fetch_bars(&self, request: &BarsRequest) -> Result<Series, ProviderError> {
        let remote_symbol = self.remote_symbol(&request.symbol);
        let end_ms = request.now.timestamp_millis();
        let mut cursor_ms = request.start().map(|s| s.timestamp_millis());

        let mut rows: Vec<RawKline> = Vec::new();
        loop {
            let page = self.fetch_page(&remote_symbol, cursor_ms, end_ms).await?;
            let page_len = page.len();
            let last_close_ms = page.last().map(|row| row.6);
            rows.extend(page);

            // A short page means the range is exhausted. Without a start
            // cursor Binance already answered with the most recent page,
            // which is all the unbounded lookback asks for.
            if page_len < PAGE_LIMIT || cursor_ms.is_none() {
                break;
            }
            match last_close_ms {
                Some(close_ms) if close_ms < end_ms => cursor_ms = Some(close_ms + 1),
                _ => break,
            }
        }

        parse_klines(&request.symbol, rows)
    }

    fn name(&self) -> &'static str {
        "binance"
    }
}

/// Maps raw kline rows onto a validated [`Series`].
fn parse_klines(symbol: &str, rows: Vec<RawKline>) -> Result<Series, ProviderError> {
    let mut bars = Vec::with_capacity(rows.len());
    for row in rows {
        let (open_time, open, high, low, close, volume, ..) = row;
        let timestamp = timestamp_from_millis(open_time)?;
        bars.push(Bar {
            timestamp,
            open: parse_price(&open, open_time)?,
            high: parse_price(&high, open_time)?,
            low: parse_price(&low, open_time)?,
            close: parse_price(&close, open_time)?,
            volume: parse_price(&volume, open_time)?,
        });
    }
    Ok(Series::new(symbol, bars)?)
}

fn timestamp_from_millis(ms: i64) -> Result<DateTime<Utc>, ProviderError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| ProviderError::Malformed(format!("kline open time out of range: {ms}")))
}

fn parse_price(raw: &str, open_time: i64) -> Result<f64, ProviderError> {
    raw.parse::<f64>().map_err(|_| {
        ProviderError::Malformed(format!("non-numeric field {raw:?} in kline at {open_time}"))
    })
}
