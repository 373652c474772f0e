//! Quote-related error types.

use thiserror::Error;

use kabutrack_market_data::MarketDataError;

/// Errors that can occur while fetching quote data.
///
/// These are recoverable from the calculators' point of view: a failed quote
/// degrades to the stock's last-known price and is logged, never surfaced as
/// a calculation failure.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}

impl From<MarketDataError> for QuoteError {
    fn from(error: MarketDataError) -> Self {
        match error {
            MarketDataError::Network(e) => QuoteError::Provider(e.to_string()),
            MarketDataError::Parse(msg) => QuoteError::Parse(msg),
            MarketDataError::SymbolNotFound(code) => QuoteError::SymbolNotFound(code),
        }
    }
}
