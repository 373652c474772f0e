//! Lot repository and service traits.
//!
//! These traits define the contract for lot operations without any
//! database-specific types. The commit methods take a complete write set and
//! must apply it all-or-nothing; they fail with `Error::Conflict` when the
//! optimistic preconditions no longer hold.

use async_trait::async_trait;

use super::lots_model::{
    BuyEvent, PurchasePlan, PurchaseRequest, SalePlan, SellEvent, SellRequest, StockLot,
};
use crate::errors::Result;

/// Trait defining the contract for lot repository operations.
#[async_trait]
pub trait LotRepositoryTrait: Send + Sync {
    /// Retrieves a lot by its ID.
    fn get_lot(&self, lot_id: &str) -> Result<StockLot>;

    /// Lists all lots, including fully closed ones.
    fn list_lots(&self) -> Result<Vec<StockLot>>;

    /// Lists an owner's lots, including fully closed ones.
    fn find_lots_by_owner(&self, owner_id: &str) -> Result<Vec<StockLot>>;

    /// The owner's lot for a stock, if one exists. At most one lot exists
    /// per owner and stock.
    fn find_lot_by_owner_and_stock(
        &self,
        owner_id: &str,
        stock_id: &str,
    ) -> Result<Option<StockLot>>;

    /// A lot's purchase events in ascending transaction-date order.
    fn find_buy_events_by_lot(&self, lot_id: &str) -> Result<Vec<BuyEvent>>;

    /// The sale events already booked against a purchase event.
    fn find_sell_events_by_buy_event(&self, buy_event_id: &str) -> Result<Vec<SellEvent>>;

    /// Applies a purchase write set in one transaction and returns the lot
    /// in its post-commit state.
    async fn commit_purchase(&self, plan: PurchasePlan) -> Result<StockLot>;

    /// Applies a sale write set - sale events, history copies, and the
    /// lot's new open-unit count - in one transaction. Returns the created
    /// sale events.
    async fn commit_sale(&self, plan: SalePlan) -> Result<Vec<SellEvent>>;
}

/// Trait defining the contract for lot service operations.
#[async_trait]
pub trait LotServiceTrait: Send + Sync {
    /// Records a purchase, creating the owner's lot for the stock on first
    /// purchase and appending a purchase event afterwards.
    async fn record_purchase(&self, request: PurchaseRequest) -> Result<StockLot>;

    /// Sells units from a lot. Produces one sale event per purchase event
    /// drawn from (oldest first) and updates the lot's open units.
    /// Fails with `InsufficientUnits` when the request exceeds the remaining
    /// quantity; nothing is written in that case.
    async fn sell_lot(&self, lot_id: &str, request: SellRequest) -> Result<Vec<SellEvent>>;

    /// Retrieves a lot by ID.
    fn get_lot(&self, lot_id: &str) -> Result<StockLot>;

    /// Lists all lots.
    fn list_lots(&self) -> Result<Vec<StockLot>>;

    /// Lists an owner's lots.
    fn find_lots_by_owner(&self, owner_id: &str) -> Result<Vec<StockLot>>;

    /// Verifies that the lot's stored open-unit count matches its event
    /// history. Fails with `InvariantViolation` on divergence.
    fn check_lot_integrity(&self, lot_id: &str) -> Result<()>;
}
