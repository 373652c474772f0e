//! Domain-wide constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Japanese capital-gains tax rate applied to non-NISA gains and income.
pub const CAPITAL_GAINS_TAX_RATE: Decimal = dec!(0.20315);

/// Decimal precision for money amounts (JPY with sub-yen quote prices).
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// How many times a sale commit is retried when a concurrent writer
/// invalidated the allocation plan.
pub const SALE_COMMIT_ATTEMPTS: u32 = 3;
