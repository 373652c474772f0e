//! Quote data shapes returned by providers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of a listed stock.
///
/// Every field is optional: the quote page may omit any of them (halted
/// stocks, missing dividend forecasts, no scheduled earnings). Callers must
/// apply their own fallback instead of reading a missing field as zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    /// Last traded price.
    pub price: Option<Decimal>,

    /// Forecast dividend per share.
    pub dividend_per_share: Option<Decimal>,

    /// Next scheduled earnings announcement.
    pub earnings_date: Option<NaiveDate>,

    /// Previous session's closing price.
    pub previous_close: Option<Decimal>,
}

impl StockQuote {
    /// Returns true when the provider returned nothing usable at all.
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.dividend_per_share.is_none()
            && self.earnings_date.is_none()
            && self.previous_close.is_none()
    }
}
