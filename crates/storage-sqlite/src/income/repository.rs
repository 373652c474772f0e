use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{benefit_records, income_records};

use kabutrack_core::errors::Result;
use kabutrack_core::income::{
    BenefitRecord, IncomeRecord, IncomeRepositoryTrait,
};

use super::model::{BenefitRecordDB, IncomeRecordDB};

/// Repository for dividend and benefit history records
pub struct IncomeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl IncomeRepository {
    /// Creates a new IncomeRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl IncomeRepositoryTrait for IncomeRepository {
    fn find_income_by_lot(&self, lot_id: &str) -> Result<Vec<IncomeRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let results = income_records::table
            .select(IncomeRecordDB::as_select())
            .filter(income_records::stock_lot_id.eq(lot_id))
            .order(income_records::payment_date.asc())
            .load::<IncomeRecordDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(IncomeRecord::try_from).collect()
    }

    fn find_benefit_by_lot(&self, lot_id: &str) -> Result<Vec<BenefitRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let results = benefit_records::table
            .select(BenefitRecordDB::as_select())
            .filter(benefit_records::stock_lot_id.eq(lot_id))
            .order(benefit_records::payment_date.asc())
            .load::<BenefitRecordDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(BenefitRecord::try_from).collect()
    }

    fn find_income_by_sell_event(&self, sell_event_id: &str) -> Result<Vec<IncomeRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let results = income_records::table
            .select(IncomeRecordDB::as_select())
            .filter(income_records::sell_event_id.eq(sell_event_id))
            .order(income_records::payment_date.asc())
            .load::<IncomeRecordDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(IncomeRecord::try_from).collect()
    }

    fn find_benefit_by_sell_event(&self, sell_event_id: &str) -> Result<Vec<BenefitRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let results = benefit_records::table
            .select(BenefitRecordDB::as_select())
            .filter(benefit_records::sell_event_id.eq(sell_event_id))
            .order(benefit_records::payment_date.asc())
            .load::<BenefitRecordDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(BenefitRecord::try_from).collect()
    }

    async fn save_income(&self, record: IncomeRecord) -> Result<IncomeRecord> {
        self.writer
            .exec(move |conn| {
                diesel::insert_into(income_records::table)
                    .values(IncomeRecordDB::from(&record))
                    .execute(conn)
                    .into_core()?;
                Ok(record)
            })
            .await
    }

    async fn save_benefit(&self, record: BenefitRecord) -> Result<BenefitRecord> {
        self.writer
            .exec(move |conn| {
                diesel::insert_into(benefit_records::table)
                    .values(BenefitRecordDB::from(&record))
                    .execute(conn)
                    .into_core()?;
                Ok(record)
            })
            .await
    }
}
