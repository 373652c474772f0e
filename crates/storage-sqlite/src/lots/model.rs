//! Database models for lots and their events.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kabutrack_core::errors::Error;
use kabutrack_core::lots::{BuyEvent, SellEvent, StockLot};

use crate::utils::{parse_date, parse_decimal};

/// Database model for stock lots
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::stock_lots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockLotDB {
    pub id: String,
    pub owner_id: String,
    pub stock_id: String,
    pub open_units: i32,
}

impl From<StockLotDB> for StockLot {
    fn from(db: StockLotDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            stock_id: db.stock_id,
            open_units: db.open_units,
        }
    }
}

impl From<&StockLot> for StockLotDB {
    fn from(domain: &StockLot) -> Self {
        Self {
            id: domain.id.clone(),
            owner_id: domain.owner_id.clone(),
            stock_id: domain.stock_id.clone(),
            open_units: domain.open_units,
        }
    }
}

/// Database model for purchase events
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
#[diesel(table_name = crate::schema::buy_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BuyEventDB {
    pub id: String,
    pub lot_id: String,
    pub quantity: i32,
    pub unit_price: String,
    pub fee: String,
    pub is_nisa: bool,
    pub transaction_date: String,
}

impl TryFrom<BuyEventDB> for BuyEvent {
    type Error = Error;

    fn try_from(db: BuyEventDB) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: parse_decimal(&db.unit_price, "buy_events.unit_price")?,
            fee: parse_decimal(&db.fee, "buy_events.fee")?,
            transaction_date: parse_date(&db.transaction_date, "buy_events.transaction_date")?,
            id: db.id,
            lot_id: db.lot_id,
            quantity: db.quantity,
            is_nisa: db.is_nisa,
        })
    }
}

impl From<&BuyEvent> for BuyEventDB {
    fn from(domain: &BuyEvent) -> Self {
        Self {
            id: domain.id.clone(),
            lot_id: domain.lot_id.clone(),
            quantity: domain.quantity,
            unit_price: domain.unit_price.to_string(),
            fee: domain.fee.to_string(),
            is_nisa: domain.is_nisa,
            transaction_date: domain.transaction_date.to_string(),
        }
    }
}

/// Database model for sale events
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
#[diesel(table_name = crate::schema::sell_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SellEventDB {
    pub id: String,
    pub buy_event_id: String,
    pub quantity: i32,
    pub unit_price: String,
    pub fee: String,
    pub transaction_date: String,
}

impl TryFrom<SellEventDB> for SellEvent {
    type Error = Error;

    fn try_from(db: SellEventDB) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: parse_decimal(&db.unit_price, "sell_events.unit_price")?,
            fee: parse_decimal(&db.fee, "sell_events.fee")?,
            transaction_date: parse_date(&db.transaction_date, "sell_events.transaction_date")?,
            id: db.id,
            buy_event_id: db.buy_event_id,
            quantity: db.quantity,
        })
    }
}

impl From<&SellEvent> for SellEventDB {
    fn from(domain: &SellEvent) -> Self {
        Self {
            id: domain.id.clone(),
            buy_event_id: domain.buy_event_id.clone(),
            quantity: domain.quantity,
            unit_price: domain.unit_price.to_string(),
            fee: domain.fee.to_string(),
            transaction_date: domain.transaction_date.to_string(),
        }
    }
}
