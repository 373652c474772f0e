//! Text-encoding helpers for stored values.
//!
//! Money and dates are stored as TEXT (exact decimal strings and ISO dates).
//! Decoding failures mean a corrupt row and surface as internal database
//! errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use kabutrack_core::errors::Result;

use crate::errors::StorageError;

/// Parses a stored decimal column value.
pub fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::Corrupt(format!("{}: '{}' ({})", column, value, e)).into())
}

/// Parses a stored ISO-8601 date column value.
pub fn parse_date(value: &str, column: &str) -> Result<NaiveDate> {
    NaiveDate::from_str(value)
        .map_err(|e| StorageError::Corrupt(format!("{}: '{}' ({})", column, value, e)).into())
}
