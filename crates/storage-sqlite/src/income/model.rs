//! Database models for income and benefit history.
//!
//! The domain's tagged attachment becomes two nullable foreign keys here;
//! a CHECK constraint keeps exactly one of them set. Decoding a row that
//! violates the rule anyway is a corrupt-database error.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kabutrack_core::errors::Error;
use kabutrack_core::income::{BenefitRecord, HistoryAttachment, IncomeRecord};

use crate::errors::StorageError;
use crate::utils::{parse_date, parse_decimal};

fn attachment_from_columns(
    record_id: &str,
    stock_lot_id: Option<String>,
    sell_event_id: Option<String>,
) -> Result<HistoryAttachment, Error> {
    match (stock_lot_id, sell_event_id) {
        (Some(lot_id), None) => Ok(HistoryAttachment::Lot(lot_id)),
        (None, Some(sale_id)) => Ok(HistoryAttachment::ClosedSale(sale_id)),
        _ => Err(StorageError::Corrupt(format!(
            "history record {} must reference exactly one of a lot or a sale",
            record_id
        ))
        .into()),
    }
}

fn attachment_to_columns(attachment: &HistoryAttachment) -> (Option<String>, Option<String>) {
    match attachment {
        HistoryAttachment::Lot(lot_id) => (Some(lot_id.clone()), None),
        HistoryAttachment::ClosedSale(sale_id) => (None, Some(sale_id.clone())),
    }
}

/// Database model for dividend records
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::income_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IncomeRecordDB {
    pub id: String,
    pub stock_lot_id: Option<String>,
    pub sell_event_id: Option<String>,
    pub amount: String,
    pub payment_date: String,
}

impl TryFrom<IncomeRecordDB> for IncomeRecord {
    type Error = Error;

    fn try_from(db: IncomeRecordDB) -> Result<Self, Self::Error> {
        Ok(Self {
            attachment: attachment_from_columns(&db.id, db.stock_lot_id, db.sell_event_id)?,
            amount: parse_decimal(&db.amount, "income_records.amount")?,
            payment_date: parse_date(&db.payment_date, "income_records.payment_date")?,
            id: db.id,
        })
    }
}

impl From<&IncomeRecord> for IncomeRecordDB {
    fn from(domain: &IncomeRecord) -> Self {
        let (stock_lot_id, sell_event_id) = attachment_to_columns(&domain.attachment);
        Self {
            id: domain.id.clone(),
            stock_lot_id,
            sell_event_id,
            amount: domain.amount.to_string(),
            payment_date: domain.payment_date.to_string(),
        }
    }
}

/// Database model for benefit records
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::benefit_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BenefitRecordDB {
    pub id: String,
    pub stock_lot_id: Option<String>,
    pub sell_event_id: Option<String>,
    pub value: String,
    pub payment_date: String,
}

impl TryFrom<BenefitRecordDB> for BenefitRecord {
    type Error = Error;

    fn try_from(db: BenefitRecordDB) -> Result<Self, Self::Error> {
        Ok(Self {
            attachment: attachment_from_columns(&db.id, db.stock_lot_id, db.sell_event_id)?,
            value: parse_decimal(&db.value, "benefit_records.value")?,
            payment_date: parse_date(&db.payment_date, "benefit_records.payment_date")?,
            id: db.id,
        })
    }
}

impl From<&BenefitRecord> for BenefitRecordDB {
    fn from(domain: &BenefitRecord) -> Self {
        let (stock_lot_id, sell_event_id) = attachment_to_columns(&domain.attachment);
        Self {
            id: domain.id.clone(),
            stock_lot_id,
            sell_event_id,
            value: domain.value.to_string(),
            payment_date: domain.payment_date.to_string(),
        }
    }
}
