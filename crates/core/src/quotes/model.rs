//! Core quote model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kabutrack_market_data::StockQuote;

/// A provider quote as seen by the domain layer.
///
/// All fields are optional; a missing field must never be read as zero.
/// The calculators fall back to the stock's stored price explicitly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: Option<Decimal>,
    pub dividend_per_share: Option<Decimal>,
    pub earnings_date: Option<NaiveDate>,
    pub previous_close: Option<Decimal>,
}

impl Quote {
    /// The quoted price when it is present and usable as a valuation input.
    /// A zero price (halted or unlisted) counts as unusable.
    pub fn usable_price(&self) -> Option<Decimal> {
        self.price.filter(|p| !p.is_zero())
    }
}

impl From<StockQuote> for Quote {
    fn from(quote: StockQuote) -> Self {
        Self {
            price: quote.price,
            dividend_per_share: quote.dividend_per_share,
            earnings_date: quote.earnings_date,
            previous_close: quote.previous_close,
        }
    }
}
