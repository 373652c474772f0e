//! FIFO allocation of a sell request across purchase events.
//!
//! Pure planning logic: given the lot's purchase events with their remaining
//! quantities, decide how many units each contributes to the sale and how the
//! requested fee is split. Persistence happens elsewhere.

use rust_decimal::Decimal;

use super::lots_model::{BuyEvent, SellRequest};
use crate::errors::{Error, Result};
use crate::utils::round_money;

/// A purchase event together with its unconsumed quantity.
#[derive(Debug, Clone)]
pub struct OpenBuyEvent {
    pub buy_event: BuyEvent,
    /// `quantity` minus the units already consumed by existing sale events.
    pub remaining: i32,
}

/// One slice of a sell request, drawn against a single purchase event.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub buy_event: BuyEvent,
    pub quantity: i32,
    /// This slice's share of the requested fee.
    pub fee: Decimal,
}

/// Walks the purchase events oldest-first and consumes
/// `min(remaining, still_to_sell)` units from each until the request is
/// covered.
///
/// `open_events` must be ordered by ascending transaction date. The fee is
/// split proportionally to consumed quantity, rounded to currency precision;
/// the final allocation absorbs the rounding remainder so the slices sum to
/// the requested fee exactly.
///
/// Fails with `InsufficientUnits` when the request exceeds the total
/// remaining quantity; no partial allocation is returned.
pub fn allocate(
    lot_id: &str,
    open_events: &[OpenBuyEvent],
    request: &SellRequest,
) -> Result<Vec<Allocation>> {
    let available: i32 = open_events.iter().map(|open| open.remaining.max(0)).sum();
    if request.quantity > available {
        return Err(Error::InsufficientUnits {
            lot_id: lot_id.to_string(),
            requested: request.quantity,
            available,
        });
    }

    let mut allocations = Vec::new();
    let mut still_to_sell = request.quantity;
    let mut fee_allocated = Decimal::ZERO;

    for open in open_events {
        if still_to_sell == 0 {
            break;
        }
        if open.remaining <= 0 {
            continue;
        }

        let consumed = open.remaining.min(still_to_sell);
        still_to_sell -= consumed;

        let fee = if still_to_sell == 0 {
            request.fee - fee_allocated
        } else {
            let share = round_money(
                request.fee * Decimal::from(consumed) / Decimal::from(request.quantity),
            );
            fee_allocated += share;
            share
        };

        allocations.push(Allocation {
            buy_event: open.buy_event.clone(),
            quantity: consumed,
            fee,
        });
    }

    Ok(allocations)
}
