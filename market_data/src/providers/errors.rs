use thiserror::Error;

use crate::models::series::SeriesError;

/// Errors that can occur within a `MarketDataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API returned a specific error message (e.g., bad symbol).
    #[error("API error: {0}")]
    Api(String),

    /// The payload could not be mapped onto the canonical bar schema.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The mapped bars violated the series invariants.
    #[error("invalid series from provider: {0}")]
    InvalidSeries(#[from] SeriesError),

    /// A local snapshot file was missing or unreadable.
    #[error("snapshot I/O error")]
    Io(#[from] std::io::Error),
}

/// Errors while constructing a provider (bad credentials, bad base URL).
#[derive(Debug, Error)]
pub enum ProviderInitError {
    #[error("invalid API key header")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}
