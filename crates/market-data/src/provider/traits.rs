//! Provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::StockQuote;

/// Trait for stock quote providers.
///
/// Implement this trait to add support for a new quote source. A returned
/// [`StockQuote`] may have any subset of its fields populated; only a failed
/// request or an unparseable page is an error.
#[async_trait]
pub trait FinanceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the current quote snapshot for an exchange code.
    async fn fetch_quote(&self, code: &str) -> Result<StockQuote, MarketDataError>;

    /// Fetch the display name for an exchange code, if the provider lists it.
    async fn fetch_name(&self, code: &str) -> Result<Option<String>, MarketDataError>;
}
