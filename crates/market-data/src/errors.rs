//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching or decoding quote data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The HTTP request failed (connect error, timeout, non-2xx status).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The quote page was fetched but its payload could not be decoded.
    #[error("Parsing error: {0}")]
    Parse(String),

    /// The provider has no listing for the requested code.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}

impl MarketDataError {
    /// Returns true if this error is transient and a later retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, MarketDataError::Network(_))
    }
}
