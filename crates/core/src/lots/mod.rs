//! Lots module - stock lots, purchase/sale events, and the allocation engine.
//!
//! A lot is the per-owner, per-stock aggregate that purchases accumulate
//! under and sales draw down from. Selling walks the lot's purchase events
//! oldest-first and books one sale event per purchase event drawn from;
//! dividend/benefit history is copied onto each new sale event so closed
//! sales carry their own income attribution.

mod allocation;
mod history;
mod lots_model;
mod lots_service;
mod lots_traits;

#[cfg(test)]
mod allocation_tests;


// Re-export the public interface
pub use allocation::{allocate, Allocation, OpenBuyEvent};
pub use history::copy_history_to_sale;
pub use lots_model::{
    lot_is_nisa, BuyEvent, PurchasePlan, PurchaseRequest, SalePlan, SellEvent, SellRequest,
    StockLot,
};
pub use lots_service::LotService;
pub use lots_traits::{LotRepositoryTrait, LotServiceTrait};
