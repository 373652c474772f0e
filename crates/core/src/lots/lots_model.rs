//! Lot, purchase-event, and sale-event domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::income::{BenefitRecord, IncomeRecord};
use crate::{errors::ValidationError, Error, Result};

/// The per-owner, per-stock aggregate holding record.
///
/// `open_units` counts trading units still held and always equals the sum of
/// unclosed purchase-event quantities. A lot is never deleted when it reaches
/// zero: it stays as the historical anchor for its purchase, sale, and income
/// records.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StockLot {
    pub id: String,
    pub owner_id: String,
    pub stock_id: String,
    pub open_units: i32,
}

/// One discrete acquisition of units. Immutable once created.
///
/// The NISA flag is fixed at purchase time; a lot may mix exempt and taxable
/// purchase events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyEvent {
    pub id: String,
    pub lot_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub fee: Decimal,
    pub is_nisa: bool,
    pub transaction_date: NaiveDate,
}

/// One discrete disposal of units, drawn against exactly one purchase
/// event's remaining quantity. Created only by the allocation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellEvent {
    pub id: String,
    pub buy_event_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub fee: Decimal,
    pub transaction_date: NaiveDate,
}

/// A lot counts as NISA in aggregate views only when every purchase event
/// is NISA. Mixed lots are treated as taxable for blended figures.
pub fn lot_is_nisa(buy_events: &[BuyEvent]) -> bool {
    !buy_events.is_empty() && buy_events.iter().all(|b| b.is_nisa)
}

/// Input model for recording a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub owner_id: String,
    pub stock_id: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub fee: Decimal,
    pub is_nisa: bool,
    pub transaction_date: NaiveDate,
}

impl PurchaseRequest {
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Purchase quantity must be positive: {}", self.quantity),
            )));
        }
        if self.unit_price.is_sign_negative() || self.fee.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price and fee cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for selling units from a lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub quantity: i32,
    pub unit_price: Decimal,
    pub fee: Decimal,
    pub transaction_date: NaiveDate,
}

impl SellRequest {
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Sell quantity must be positive: {}", self.quantity),
            )));
        }
        if self.unit_price.is_sign_negative() || self.fee.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price and fee cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// The complete write set for one purchase, committed atomically.
#[derive(Debug, Clone)]
pub enum PurchasePlan {
    /// First purchase of this stock by this owner: create the lot and its
    /// first purchase event together.
    NewLot { lot: StockLot, buy_event: BuyEvent },
    /// The owner already holds this stock: append a purchase event and bump
    /// the lot's open units. `expected_open_units` is the optimistic
    /// precondition checked inside the commit transaction.
    ExistingLot {
        lot_id: String,
        expected_open_units: i32,
        new_open_units: i32,
        buy_event: BuyEvent,
    },
}

/// The complete write set for one sell request, committed atomically:
/// either every sale event and history copy lands, or none do.
#[derive(Debug, Clone)]
pub struct SalePlan {
    pub lot_id: String,
    /// The lot's open units the plan was computed against; the commit fails
    /// with a conflict when the stored value has moved.
    pub expected_open_units: i32,
    pub new_open_units: i32,
    pub sell_events: Vec<SellEvent>,
    pub income_copies: Vec<IncomeRecord>,
    pub benefit_copies: Vec<BenefitRecord>,
}
