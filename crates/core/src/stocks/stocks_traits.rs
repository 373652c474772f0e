//! Stock repository and service traits.

use async_trait::async_trait;

use super::stocks_model::{NewStock, Stock};
use crate::errors::Result;

/// Trait defining the contract for Stock repository operations.
#[async_trait]
pub trait StockRepositoryTrait: Send + Sync {
    /// Creates a new stock.
    async fn create(&self, new_stock: NewStock) -> Result<Stock>;

    /// Updates an existing stock.
    async fn update(&self, stock: Stock) -> Result<Stock>;

    /// Retrieves a stock by its ID.
    fn get_by_id(&self, stock_id: &str) -> Result<Stock>;

    /// Retrieves a stock by its exchange code, if registered.
    fn find_by_code(&self, code: &str) -> Result<Option<Stock>>;

    /// Lists all stocks.
    fn list(&self) -> Result<Vec<Stock>>;
}

/// Trait defining the contract for Stock service operations.
#[async_trait]
pub trait StockServiceTrait: Send + Sync {
    /// Registers a new stock with business validation.
    async fn create_stock(&self, new_stock: NewStock) -> Result<Stock>;

    /// Retrieves a stock by ID.
    fn get_stock(&self, stock_id: &str) -> Result<Stock>;

    /// Lists all stocks.
    fn list_stocks(&self) -> Result<Vec<Stock>>;

    /// Refreshes a stock's price, dividend, and earnings date from the
    /// quote provider. The stored row is left untouched when the provider
    /// fails.
    async fn refresh_stock(&self, stock_id: &str) -> Result<Stock>;
}
