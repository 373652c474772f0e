//! Income repository and service traits.

use async_trait::async_trait;

use super::income_model::{BenefitRecord, IncomeRecord, NewBenefit, NewIncome};
use crate::errors::Result;

/// Trait defining the contract for income/benefit repository operations.
#[async_trait]
pub trait IncomeRepositoryTrait: Send + Sync {
    /// Dividend records still attached to the lot (the lifetime view).
    fn find_income_by_lot(&self, lot_id: &str) -> Result<Vec<IncomeRecord>>;

    /// Benefit records still attached to the lot.
    fn find_benefit_by_lot(&self, lot_id: &str) -> Result<Vec<BenefitRecord>>;

    /// Dividend copies re-attributed to a closing sale.
    fn find_income_by_sell_event(&self, sell_event_id: &str) -> Result<Vec<IncomeRecord>>;

    /// Benefit copies re-attributed to a closing sale.
    fn find_benefit_by_sell_event(&self, sell_event_id: &str) -> Result<Vec<BenefitRecord>>;

    /// Persists a dividend record.
    async fn save_income(&self, record: IncomeRecord) -> Result<IncomeRecord>;

    /// Persists a benefit record.
    async fn save_benefit(&self, record: BenefitRecord) -> Result<BenefitRecord>;
}

/// Trait defining the contract for income service operations.
#[async_trait]
pub trait IncomeServiceTrait: Send + Sync {
    /// Records a dividend against a live lot.
    async fn record_income(&self, new_income: NewIncome) -> Result<IncomeRecord>;

    /// Records a shareholder benefit against a live lot.
    async fn record_benefit(&self, new_benefit: NewBenefit) -> Result<BenefitRecord>;
}
