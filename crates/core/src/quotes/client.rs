//! Quote client - facade over the market-data crate.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::Result;
use crate::quotes::model::Quote;

use kabutrack_market_data::FinanceProvider;

/// Trait for fetching quotes from the domain layer.
///
/// Calculators depend on this trait so tests can supply canned quotes.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Fetch the current quote snapshot for an exchange code.
    async fn fetch_quote(&self, code: &str) -> Result<Quote>;

    /// Fetch the display name for an exchange code.
    async fn fetch_name(&self, code: &str) -> Result<Option<String>>;
}

/// Production quote service backed by a market-data provider.
pub struct QuoteClient {
    provider: Arc<dyn FinanceProvider>,
}

impl QuoteClient {
    pub fn new(provider: Arc<dyn FinanceProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteClient {
    async fn fetch_quote(&self, code: &str) -> Result<Quote> {
        let quote = self
            .provider
            .fetch_quote(code)
            .await
            .map_err(crate::quotes::QuoteError::from)?;
        debug!("Fetched quote for {} from {}", code, self.provider.id());
        Ok(quote.into())
    }

    async fn fetch_name(&self, code: &str) -> Result<Option<String>> {
        let name = self
            .provider
            .fetch_name(code)
            .await
            .map_err(crate::quotes::QuoteError::from)?;
        Ok(name)
    }
}
