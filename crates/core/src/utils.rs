//! Small shared helpers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MONEY_DECIMAL_PRECISION;

/// Rounds a money amount to currency precision, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        MONEY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
