//! Stock domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Reference data for a listed stock.
///
/// `current_price` is the last-known price, refreshed from the quote
/// provider; it is the valuation fallback when a live quote is unavailable.
/// `minimal_unit` is the trading unit size (typically 100 shares on the TSE):
/// lot quantities are counted in units, prices per share.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: String,
    /// Exchange code, e.g. "7203".
    pub code: String,
    pub name: String,
    pub current_price: Decimal,
    /// Forecast dividend per share.
    pub dividend: Decimal,
    /// Shares per trading unit.
    pub minimal_unit: i32,
    pub earnings_date: Option<NaiveDate>,
    pub sector: Option<String>,
}

/// Input model for registering a new stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub current_price: Decimal,
    pub dividend: Decimal,
    pub minimal_unit: i32,
    pub earnings_date: Option<NaiveDate>,
    pub sector: Option<String>,
}

impl NewStock {
    /// Validates the new stock data.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Stock code cannot be empty".to_string(),
            )));
        }
        if !self.code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Stock code must be alphanumeric: {}", self.code),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Stock name cannot be empty".to_string(),
            )));
        }
        if self.minimal_unit < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                format!("Minimal unit must be at least 1: {}", self.minimal_unit),
            )));
        }
        if self.current_price.is_sign_negative() || self.dividend.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price and dividend cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}
