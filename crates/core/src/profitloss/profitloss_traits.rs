//! Profit/loss service trait.

use std::collections::HashMap;

use async_trait::async_trait;

use super::profitloss_model::{HoldingView, ProfitLossSummary, SaleRecord};
use crate::errors::Result;

/// Trait defining the contract for profit/loss calculations.
///
/// All operations are read-only and may run concurrently with sells; they
/// tolerate eventual consistency but never fabricate data from missing
/// quotes.
#[async_trait]
pub trait ProfitLossServiceTrait: Send + Sync {
    /// Aggregate realized/unrealized/income figures for one owner, or for
    /// everyone when `owner_id` is `None`.
    async fn compute_profit_loss(&self, owner_id: Option<&str>) -> Result<ProfitLossSummary>;

    /// Per-sale breakdown of closed positions with their re-attributed
    /// income.
    async fn get_closed_sale_breakdown(&self, owner_id: Option<&str>) -> Result<Vec<SaleRecord>>;

    /// Open holdings grouped by the lot-level NISA flag.
    async fn get_holdings(&self, owner_id: Option<&str>)
        -> Result<HashMap<bool, Vec<HoldingView>>>;
}
