//! Tests for the FIFO allocation planner.

#[cfg(test)]
mod tests {
    use crate::lots::{allocate, BuyEvent, OpenBuyEvent, SellRequest};
    use crate::Error;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buy_event(id: &str, quantity: i32, unit_price: Decimal, day: u32) -> BuyEvent {
        BuyEvent {
            id: id.to_string(),
            lot_id: "lot-1".to_string(),
            quantity,
            unit_price,
            fee: Decimal::ZERO,
            is_nisa: false,
            transaction_date: date(2025, 1, day),
        }
    }

    fn open(id: &str, quantity: i32, remaining: i32, unit_price: Decimal, day: u32) -> OpenBuyEvent {
        OpenBuyEvent {
            buy_event: buy_event(id, quantity, unit_price, day),
            remaining,
        }
    }

    fn sell(quantity: i32, fee: Decimal) -> SellRequest {
        SellRequest {
            quantity,
            unit_price: dec!(2000),
            fee,
            transaction_date: date(2025, 6, 1),
        }
    }

    #[test]
    fn consumes_a_single_event_exactly() {
        let events = vec![open("buy-a", 10, 10, dec!(1000), 1)];
        let allocations = allocate("lot-1", &events, &sell(10, dec!(0))).unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].quantity, 10);
        assert_eq!(allocations[0].buy_event.id, "buy-a");
        assert_eq!(allocations[0].fee, dec!(0));
    }

    #[test]
    fn spans_events_oldest_first() {
        let events = vec![
            open("buy-a", 4, 4, dec!(1800), 1),
            open("buy-b", 6, 6, dec!(1900), 15),
        ];
        let allocations = allocate("lot-1", &events, &sell(8, dec!(0))).unwrap();

        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].buy_event.id, "buy-a");
        assert_eq!(allocations[0].quantity, 4);
        assert_eq!(allocations[1].buy_event.id, "buy-b");
        assert_eq!(allocations[1].quantity, 4);
    }

    #[test]
    fn skips_fully_consumed_events() {
        let events = vec![
            open("buy-a", 4, 0, dec!(1800), 1),
            open("buy-b", 6, 6, dec!(1900), 15),
        ];
        let allocations = allocate("lot-1", &events, &sell(3, dec!(0))).unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].buy_event.id, "buy-b");
        assert_eq!(allocations[0].quantity, 3);
    }

    #[test]
    fn oversell_fails_with_available_count() {
        let events = vec![
            open("buy-a", 4, 1, dec!(1800), 1),
            open("buy-b", 6, 2, dec!(1900), 15),
        ];
        let err = allocate("lot-1", &events, &sell(5, dec!(0))).unwrap_err();

        match err {
            Error::InsufficientUnits {
                lot_id,
                requested,
                available,
            } => {
                assert_eq!(lot_id, "lot-1");
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientUnits, got {other}"),
        }
    }

    #[test]
    fn fee_splits_proportionally_with_remainder_on_last() {
        let events = vec![
            open("buy-a", 1, 1, dec!(1800), 1),
            open("buy-b", 2, 2, dec!(1900), 15),
        ];
        let allocations = allocate("lot-1", &events, &sell(3, dec!(100))).unwrap();

        // 100 * 1/3 rounds to 33.33; the final slice absorbs the remainder.
        assert_eq!(allocations[0].fee, dec!(33.33));
        assert_eq!(allocations[1].fee, dec!(66.67));
        let total: Decimal = allocations.iter().map(|a| a.fee).sum();
        assert_eq!(total, dec!(100));
    }

    #[test]
    fn fee_conservation_across_many_events() {
        let events = vec![
            open("buy-a", 3, 3, dec!(100), 1),
            open("buy-b", 3, 3, dec!(110), 2),
            open("buy-c", 3, 3, dec!(120), 3),
        ];
        let request = sell(7, dec!(55.55));
        let allocations = allocate("lot-1", &events, &request).unwrap();

        assert_eq!(allocations.len(), 3);
        let total: Decimal = allocations.iter().map(|a| a.fee).sum();
        assert_eq!(total, dec!(55.55));
    }

    #[test]
    fn whole_fee_lands_on_a_single_slice_sale() {
        let events = vec![open("buy-a", 10, 10, dec!(1000), 1)];
        let allocations = allocate("lot-1", &events, &sell(4, dec!(250))).unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].fee, dec!(250));
    }
}
