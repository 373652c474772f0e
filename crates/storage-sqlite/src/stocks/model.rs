//! Database model for stocks.
//!
//! Money columns are stored as exact decimal strings, dates as ISO-8601
//! text.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kabutrack_core::errors::Error;
use kabutrack_core::stocks::{NewStock, Stock};

use crate::utils::{parse_date, parse_decimal};

/// Database model for stocks
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
#[diesel(table_name = crate::schema::stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockDB {
    pub id: String,
    pub code: String,
    pub name: String,
    pub current_price: String,
    pub dividend: String,
    pub minimal_unit: i32,
    pub earnings_date: Option<String>,
    pub sector: Option<String>,
}

impl TryFrom<StockDB> for Stock {
    type Error = Error;

    fn try_from(db: StockDB) -> Result<Self, Self::Error> {
        Ok(Self {
            current_price: parse_decimal(&db.current_price, "stocks.current_price")?,
            dividend: parse_decimal(&db.dividend, "stocks.dividend")?,
            earnings_date: db
                .earnings_date
                .as_deref()
                .map(|d| parse_date(d, "stocks.earnings_date"))
                .transpose()?,
            id: db.id,
            code: db.code,
            name: db.name,
            minimal_unit: db.minimal_unit,
            sector: db.sector,
        })
    }
}

impl From<&Stock> for StockDB {
    fn from(domain: &Stock) -> Self {
        Self {
            id: domain.id.clone(),
            code: domain.code.clone(),
            name: domain.name.clone(),
            current_price: domain.current_price.to_string(),
            dividend: domain.dividend.to_string(),
            minimal_unit: domain.minimal_unit,
            earnings_date: domain.earnings_date.map(|d| d.to_string()),
            sector: domain.sector.clone(),
        }
    }
}

impl From<NewStock> for StockDB {
    fn from(domain: NewStock) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            code: domain.code,
            name: domain.name,
            current_price: domain.current_price.to_string(),
            dividend: domain.dividend.to_string(),
            minimal_unit: domain.minimal_unit,
            earnings_date: domain.earnings_date.map(|d| d.to_string()),
            sector: domain.sector,
        }
    }
}
