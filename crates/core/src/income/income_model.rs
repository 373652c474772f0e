//! Income and benefit history models.
//!
//! Dividend and shareholder-benefit records belong to exactly one of two
//! places: the lot that earned them, or the sale that closed part of that
//! lot out. [`HistoryAttachment`] makes the other shapes unrepresentable;
//! the two-nullable-columns form exists only at the storage boundary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Where a history record is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryAttachment {
    /// Attached to a live lot: the record as originally entered.
    Lot(String),
    /// Re-attributed to a closing sale: a copy made when the sale was booked.
    ClosedSale(String),
}

impl HistoryAttachment {
    pub fn lot_id(&self) -> Option<&str> {
        match self {
            HistoryAttachment::Lot(id) => Some(id),
            HistoryAttachment::ClosedSale(_) => None,
        }
    }

    pub fn sell_event_id(&self) -> Option<&str> {
        match self {
            HistoryAttachment::Lot(_) => None,
            HistoryAttachment::ClosedSale(id) => Some(id),
        }
    }
}

/// A dividend payment received by a lot.
///
/// Records are never mutated in place. When a sale closes against the lot,
/// a copy with identical figures is created under
/// `HistoryAttachment::ClosedSale`; the original stays on the lot as its
/// lifetime audit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub id: String,
    pub attachment: HistoryAttachment,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
}

/// A shareholder perk, valued in money. Same attachment rules as
/// [`IncomeRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitRecord {
    pub id: String,
    pub attachment: HistoryAttachment,
    pub value: Decimal,
    pub payment_date: NaiveDate,
}

/// Input model for recording a dividend against a lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub lot_id: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        if self.lot_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "lotId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Dividend amount must be positive: {}", self.amount),
            )));
        }
        Ok(())
    }
}

/// Input model for recording a shareholder benefit against a lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBenefit {
    pub lot_id: String,
    pub value: Decimal,
    pub payment_date: NaiveDate,
}

impl NewBenefit {
    pub fn validate(&self) -> Result<()> {
        if self.lot_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "lotId".to_string(),
            )));
        }
        if self.value <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Benefit value must be positive: {}", self.value),
            )));
        }
        Ok(())
    }
}
