use log::debug;
use std::sync::Arc;

use super::income_model::{
    BenefitRecord, HistoryAttachment, IncomeRecord, NewBenefit, NewIncome,
};
use super::income_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
use crate::errors::Result;
use crate::lots::LotRepositoryTrait;

/// Service for recording dividend and benefit history against lots.
pub struct IncomeService {
    repository: Arc<dyn IncomeRepositoryTrait>,
    lot_repository: Arc<dyn LotRepositoryTrait>,
}

impl IncomeService {
    /// Creates a new IncomeService instance
    pub fn new(
        repository: Arc<dyn IncomeRepositoryTrait>,
        lot_repository: Arc<dyn LotRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            lot_repository,
        }
    }
}

#[async_trait::async_trait]
impl IncomeServiceTrait for IncomeService {
    /// Records a dividend against a live lot
    async fn record_income(&self, new_income: NewIncome) -> Result<IncomeRecord> {
        new_income.validate()?;
        let lot = self.lot_repository.get_lot(&new_income.lot_id)?;

        let record = IncomeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            attachment: HistoryAttachment::Lot(lot.id),
            amount: new_income.amount,
            payment_date: new_income.payment_date,
        };
        debug!(
            "Recording dividend of {} for lot {}",
            record.amount, new_income.lot_id
        );
        self.repository.save_income(record).await
    }

    /// Records a shareholder benefit against a live lot
    async fn record_benefit(&self, new_benefit: NewBenefit) -> Result<BenefitRecord> {
        new_benefit.validate()?;
        let lot = self.lot_repository.get_lot(&new_benefit.lot_id)?;

        let record = BenefitRecord {
            id: uuid::Uuid::new_v4().to_string(),
            attachment: HistoryAttachment::Lot(lot.id),
            value: new_benefit.value,
            payment_date: new_benefit.payment_date,
        };
        debug!(
            "Recording benefit of {} for lot {}",
            record.value, new_benefit.lot_id
        );
        self.repository.save_benefit(record).await
    }
}
