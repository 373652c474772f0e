use log::{debug, warn};
use std::sync::Arc;

use super::stocks_model::{NewStock, Stock};
use super::stocks_traits::{StockRepositoryTrait, StockServiceTrait};
use crate::errors::Result;
use crate::quotes::QuoteServiceTrait;

/// Service for managing stock reference data.
pub struct StockService {
    repository: Arc<dyn StockRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl StockService {
    /// Creates a new StockService instance
    pub fn new(
        repository: Arc<dyn StockRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            repository,
            quote_service,
        }
    }
}

#[async_trait::async_trait]
impl StockServiceTrait for StockService {
    /// Registers a new stock after validating the input
    async fn create_stock(&self, new_stock: NewStock) -> Result<Stock> {
        new_stock.validate()?;
        self.repository.create(new_stock).await
    }

    /// Retrieves a stock by its ID
    fn get_stock(&self, stock_id: &str) -> Result<Stock> {
        self.repository.get_by_id(stock_id)
    }

    /// Lists all stocks
    fn list_stocks(&self) -> Result<Vec<Stock>> {
        self.repository.list()
    }

    /// Refreshes price, dividend, and earnings date from the quote provider.
    ///
    /// Missing fields keep their stored values; a zero quoted price is
    /// treated as missing. A provider failure is logged and surfaced, and
    /// nothing is written.
    async fn refresh_stock(&self, stock_id: &str) -> Result<Stock> {
        let mut stock = self.repository.get_by_id(stock_id)?;

        let quote = match self.quote_service.fetch_quote(&stock.code).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Quote refresh failed for {}: {}", stock.code, e);
                return Err(e);
            }
        };

        if let Some(price) = quote.usable_price() {
            stock.current_price = price;
        }
        if let Some(dividend) = quote.dividend_per_share {
            stock.dividend = dividend;
        }
        if let Some(earnings_date) = quote.earnings_date {
            stock.earnings_date = Some(earnings_date);
        }

        debug!(
            "Refreshed stock {}: price={}, dividend={}",
            stock.code, stock.current_price, stock.dividend
        );
        self.repository.update(stock).await
    }
}
