//! Profit/loss result models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate profit/loss for an owner (or all owners).
///
/// `realized` and `income` are net of capital-gains tax for non-NISA
/// positions; `total` is their sum with `unrealized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossSummary {
    pub realized: Decimal,
    pub unrealized: Decimal,
    pub income: Decimal,
    pub total: Decimal,
}

/// One closed sale with its cost basis and re-attributed income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub sell_event_id: String,
    pub lot_id: String,
    pub stock_code: String,
    pub stock_name: String,
    pub quantity: i32,
    pub buy_unit_price: Decimal,
    pub sell_unit_price: Decimal,
    pub buy_fee: Decimal,
    pub sell_fee: Decimal,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub is_nisa: bool,
    /// Net-of-tax gain or loss on this sale.
    pub realized: Decimal,
    /// Dividend copies attributed to this sale, net of tax.
    pub income: Decimal,
    /// Benefit copies attributed to this sale, net of tax.
    pub benefit: Decimal,
}

/// A currently held lot as shown on the holdings page.
///
/// Display figures: the mark-to-market value and income totals here are
/// gross, against the average acquisition price; the taxed figures live in
/// [`ProfitLossSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingView {
    pub lot_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub stock_code: String,
    pub stock_name: String,
    pub open_units: i32,
    /// Shares held: open units times the stock's minimal unit.
    pub quantity: i32,
    pub is_nisa: bool,
    /// Average acquisition price per share, fees included.
    pub average_price: Decimal,
    pub current_price: Decimal,
    pub profit_loss: Decimal,
    pub dividend: Decimal,
    pub benefit: Decimal,
    pub purchase_date: Option<NaiveDate>,
}
