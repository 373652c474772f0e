//! Tests for the profit/loss calculator.

#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::income::{
        BenefitRecord, HistoryAttachment, IncomeRecord, IncomeRepositoryTrait,
    };
    use crate::lots::{
        BuyEvent, LotRepositoryTrait, PurchasePlan, SalePlan, SellEvent, StockLot,
    };
    use crate::owners::{NewOwner, Owner, OwnerRepositoryTrait};
    use crate::profitloss::{ProfitLossService, ProfitLossServiceTrait};
    use crate::quotes::{Quote, QuoteError, QuoteServiceTrait};
    use crate::stocks::{NewStock, Stock, StockRepositoryTrait};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // --- In-memory ledger ---

    #[derive(Default)]
    struct MockLedger {
        lots: Mutex<Vec<StockLot>>,
        buy_events: Mutex<Vec<BuyEvent>>,
        sell_events: Mutex<Vec<SellEvent>>,
        incomes: Mutex<Vec<IncomeRecord>>,
        benefits: Mutex<Vec<BenefitRecord>>,
    }

    #[async_trait]
    impl LotRepositoryTrait for MockLedger {
        fn get_lot(&self, lot_id: &str) -> Result<StockLot> {
            self.lots
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == lot_id)
                .cloned()
                .ok_or_else(|| Error::NotFound("StockLot", lot_id.to_string()))
        }

        fn list_lots(&self) -> Result<Vec<StockLot>> {
            Ok(self.lots.lock().unwrap().clone())
        }

        fn find_lots_by_owner(&self, owner_id: &str) -> Result<Vec<StockLot>> {
            Ok(self
                .lots
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.owner_id == owner_id)
                .cloned()
                .collect())
        }

        fn find_lot_by_owner_and_stock(
            &self,
            owner_id: &str,
            stock_id: &str,
        ) -> Result<Option<StockLot>> {
            Ok(self
                .lots
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.owner_id == owner_id && l.stock_id == stock_id)
                .cloned())
        }

        fn find_buy_events_by_lot(&self, lot_id: &str) -> Result<Vec<BuyEvent>> {
            let mut events: Vec<BuyEvent> = self
                .buy_events
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.lot_id == lot_id)
                .cloned()
                .collect();
            events.sort_by_key(|b| b.transaction_date);
            Ok(events)
        }

        fn find_sell_events_by_buy_event(&self, buy_event_id: &str) -> Result<Vec<SellEvent>> {
            Ok(self
                .sell_events
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.buy_event_id == buy_event_id)
                .cloned()
                .collect())
        }

        async fn commit_purchase(&self, _plan: PurchasePlan) -> Result<StockLot> {
            unimplemented!()
        }

        async fn commit_sale(&self, _plan: SalePlan) -> Result<Vec<SellEvent>> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl IncomeRepositoryTrait for MockLedger {
        fn find_income_by_lot(&self, lot_id: &str) -> Result<Vec<IncomeRecord>> {
            Ok(self
                .incomes
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.attachment.lot_id() == Some(lot_id))
                .cloned()
                .collect())
        }

        fn find_benefit_by_lot(&self, lot_id: &str) -> Result<Vec<BenefitRecord>> {
            Ok(self
                .benefits
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.attachment.lot_id() == Some(lot_id))
                .cloned()
                .collect())
        }

        fn find_income_by_sell_event(&self, sell_event_id: &str) -> Result<Vec<IncomeRecord>> {
            Ok(self
                .incomes
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.attachment.sell_event_id() == Some(sell_event_id))
                .cloned()
                .collect())
        }

        fn find_benefit_by_sell_event(&self, sell_event_id: &str) -> Result<Vec<BenefitRecord>> {
            Ok(self
                .benefits
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.attachment.sell_event_id() == Some(sell_event_id))
                .cloned()
                .collect())
        }

        async fn save_income(&self, record: IncomeRecord) -> Result<IncomeRecord> {
            self.incomes.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn save_benefit(&self, record: BenefitRecord) -> Result<BenefitRecord> {
            self.benefits.lock().unwrap().push(record.clone());
            Ok(record)
        }
    }

    struct MockOwnerRepository {
        owners: Mutex<Vec<Owner>>,
    }

    #[async_trait]
    impl OwnerRepositoryTrait for MockOwnerRepository {
        async fn create(&self, _new_owner: NewOwner) -> Result<Owner> {
            unimplemented!()
        }

        fn get_by_id(&self, owner_id: &str) -> Result<Owner> {
            self.owners
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id == owner_id)
                .cloned()
                .ok_or_else(|| Error::NotFound("Owner", owner_id.to_string()))
        }

        fn list(&self) -> Result<Vec<Owner>> {
            Ok(self.owners.lock().unwrap().clone())
        }

        async fn delete(&self, _owner_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    struct MockStockRepository {
        stocks: Mutex<Vec<Stock>>,
    }

    #[async_trait]
    impl StockRepositoryTrait for MockStockRepository {
        async fn create(&self, _new_stock: NewStock) -> Result<Stock> {
            unimplemented!()
        }

        async fn update(&self, _stock: Stock) -> Result<Stock> {
            unimplemented!()
        }

        fn get_by_id(&self, stock_id: &str) -> Result<Stock> {
            self.stocks
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == stock_id)
                .cloned()
                .ok_or_else(|| Error::NotFound("Stock", stock_id.to_string()))
        }

        fn find_by_code(&self, code: &str) -> Result<Option<Stock>> {
            Ok(self
                .stocks
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.code == code)
                .cloned())
        }

        fn list(&self) -> Result<Vec<Stock>> {
            Ok(self.stocks.lock().unwrap().clone())
        }
    }

    struct MockQuoteService {
        quote: Option<Quote>,
        calls: Mutex<u32>,
    }

    impl MockQuoteService {
        fn with_price(price: Decimal) -> Self {
            Self {
                quote: Some(Quote {
                    price: Some(price),
                    ..Quote::default()
                }),
                calls: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                quote: None,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl QuoteServiceTrait for MockQuoteService {
        async fn fetch_quote(&self, code: &str) -> Result<Quote> {
            *self.calls.lock().unwrap() += 1;
            self.quote
                .clone()
                .ok_or_else(|| QuoteError::Provider(format!("unreachable: {}", code)).into())
        }

        async fn fetch_name(&self, _code: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    // --- Fixtures ---

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_stock() -> Stock {
        Stock {
            id: "stock-1".to_string(),
            code: "7203".to_string(),
            name: "Toyota".to_string(),
            current_price: dec!(2500),
            dividend: dec!(60),
            minimal_unit: 100,
            earnings_date: None,
            sector: None,
        }
    }

    fn lot(id: &str, open_units: i32) -> StockLot {
        StockLot {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            stock_id: "stock-1".to_string(),
            open_units,
        }
    }

    fn buy_event(id: &str, lot_id: &str, quantity: i32, unit_price: Decimal, day: u32) -> BuyEvent {
        BuyEvent {
            id: id.to_string(),
            lot_id: lot_id.to_string(),
            quantity,
            unit_price,
            fee: Decimal::ZERO,
            is_nisa: false,
            transaction_date: date(2025, 1, day),
        }
    }

    fn sell_event(id: &str, buy_event_id: &str, quantity: i32, unit_price: Decimal) -> SellEvent {
        SellEvent {
            id: id.to_string(),
            buy_event_id: buy_event_id.to_string(),
            quantity,
            unit_price,
            fee: Decimal::ZERO,
            transaction_date: date(2025, 9, 1),
        }
    }

    fn build_service(
        ledger: Arc<MockLedger>,
        quote_service: Arc<MockQuoteService>,
    ) -> ProfitLossService {
        let owners = Arc::new(MockOwnerRepository {
            owners: Mutex::new(vec![Owner {
                id: "owner-1".to_string(),
                name: "Taro".to_string(),
            }]),
        });
        let stocks = Arc::new(MockStockRepository {
            stocks: Mutex::new(vec![sample_stock()]),
        });
        ProfitLossService::new(ledger.clone(), ledger, owners, stocks, quote_service)
    }

    // --- Realized P/L ---

    #[tokio::test]
    async fn realized_gain_is_taxed_for_non_nisa() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-a", "lot-1", 10, dec!(1000), 1));
        ledger
            .sell_events
            .lock()
            .unwrap()
            .push(sell_event("sell-a", "buy-a", 10, dec!(1200)));
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();

        // (1200 - 1000) x 10 units x 100 shares x (1 - 0.20315)
        assert_eq!(summary.realized, dec!(159370));
        assert_eq!(summary.unrealized, dec!(0));
        assert_eq!(summary.total, dec!(159370));
    }

    #[tokio::test]
    async fn realized_gain_is_exempt_for_nisa_purchases() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 10, dec!(1000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        ledger
            .sell_events
            .lock()
            .unwrap()
            .push(sell_event("sell-a", "buy-a", 10, dec!(1200)));
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(summary.realized, dec!(200000));
    }

    #[tokio::test]
    async fn realized_subtracts_both_fees() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        let mut buy = buy_event("buy-a", "lot-1", 10, dec!(1000), 1);
        buy.fee = dec!(500);
        buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(buy);
        let mut sell = sell_event("sell-a", "buy-a", 10, dec!(1200));
        sell.fee = dec!(300);
        ledger.sell_events.lock().unwrap().push(sell);
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(summary.realized, dec!(199200));
    }

    // --- Unrealized P/L ---

    #[tokio::test]
    async fn unrealized_uses_quote_price_and_oldest_cost_basis() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 10));
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-a", "lot-1", 4, dec!(1000), 1));
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-b", "lot-1", 6, dec!(1100), 15));
        let quotes = Arc::new(MockQuoteService::with_price(dec!(1150)));
        let service = build_service(ledger, quotes);

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();

        // (1150 - 1000) x 10 units x 100 shares, taxed
        assert_eq!(summary.unrealized, dec!(119527.50));
    }

    #[tokio::test]
    async fn unrealized_falls_back_to_stored_price_on_quote_failure() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 10));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 10, dec!(2000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();

        // stored current_price 2500: (2500 - 2000) x 10 x 100, NISA-exempt
        assert_eq!(summary.unrealized, dec!(500000));
    }

    #[tokio::test]
    async fn unrealized_falls_back_when_quote_price_is_zero() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 1));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 1, dec!(2000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        let quotes = Arc::new(MockQuoteService::with_price(dec!(0)));
        let service = build_service(ledger, quotes);

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(summary.unrealized, dec!(50000));
    }

    #[tokio::test]
    async fn mixed_nisa_lot_is_taxable_in_aggregate() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 2));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 1, dec!(2000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-b", "lot-1", 1, dec!(2000), 15));
        let quotes = Arc::new(MockQuoteService::with_price(dec!(2100)));
        let service = build_service(ledger, quotes);

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();

        // (2100 - 2000) x 2 x 100 = 20000, taxed because the lot is mixed
        assert_eq!(summary.unrealized, dec!(15937));
    }

    #[tokio::test]
    async fn lot_without_buy_events_contributes_zero() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 5));
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(summary, Default::default());
    }

    // --- Income ---

    #[tokio::test]
    async fn income_sums_lot_attached_records() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 10, dec!(1000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        ledger.incomes.lock().unwrap().push(IncomeRecord {
            id: "income-1".to_string(),
            attachment: HistoryAttachment::Lot("lot-1".to_string()),
            amount: dec!(50),
            payment_date: date(2025, 3, 31),
        });
        ledger.benefits.lock().unwrap().push(BenefitRecord {
            id: "benefit-1".to_string(),
            attachment: HistoryAttachment::Lot("lot-1".to_string()),
            value: dec!(3000),
            payment_date: date(2025, 6, 30),
        });
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(summary.income, dec!(3050));
    }

    #[tokio::test]
    async fn sale_attached_copies_are_not_double_counted() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 10, dec!(1000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        ledger
            .sell_events
            .lock()
            .unwrap()
            .push(sell_event("sell-a", "buy-a", 10, dec!(1000)));
        ledger.incomes.lock().unwrap().push(IncomeRecord {
            id: "income-1".to_string(),
            attachment: HistoryAttachment::Lot("lot-1".to_string()),
            amount: dec!(50),
            payment_date: date(2025, 3, 31),
        });
        ledger.incomes.lock().unwrap().push(IncomeRecord {
            id: "income-1-copy".to_string(),
            attachment: HistoryAttachment::ClosedSale("sell-a".to_string()),
            amount: dec!(50),
            payment_date: date(2025, 3, 31),
        });
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let summary = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(summary.income, dec!(50));
    }

    // --- Closed-sale breakdown ---

    #[tokio::test]
    async fn breakdown_reports_per_sale_income_copies() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        let mut nisa_buy = buy_event("buy-a", "lot-1", 10, dec!(1000), 1);
        nisa_buy.is_nisa = true;
        ledger.buy_events.lock().unwrap().push(nisa_buy);
        ledger
            .sell_events
            .lock()
            .unwrap()
            .push(sell_event("sell-a", "buy-a", 10, dec!(1200)));
        ledger.incomes.lock().unwrap().push(IncomeRecord {
            id: "income-copy".to_string(),
            attachment: HistoryAttachment::ClosedSale("sell-a".to_string()),
            amount: dec!(50),
            payment_date: date(2025, 3, 31),
        });
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let records = service
            .get_closed_sale_breakdown(Some("owner-1"))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.sell_event_id, "sell-a");
        assert_eq!(record.quantity, 10);
        assert_eq!(record.realized, dec!(200000));
        assert_eq!(record.income, dec!(50));
        assert_eq!(record.benefit, dec!(0));
        assert!(record.is_nisa);
    }

    // --- Holdings view ---

    #[tokio::test]
    async fn holdings_average_price_includes_fees() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 10));
        let mut buy_a = buy_event("buy-a", "lot-1", 4, dec!(1800), 1);
        buy_a.fee = dec!(200);
        ledger.buy_events.lock().unwrap().push(buy_a);
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-b", "lot-1", 6, dec!(1900), 15));
        let quotes = Arc::new(MockQuoteService::with_price(dec!(2000)));
        let service = build_service(ledger, quotes);

        let grouped = service.get_holdings(Some("owner-1")).await.unwrap();
        let taxable = grouped.get(&false).unwrap();

        assert_eq!(taxable.len(), 1);
        let holding = &taxable[0];
        // (4x1800 + 200 + 6x1900) / 10 = 1880
        assert_eq!(holding.average_price, dec!(1880));
        assert_eq!(holding.quantity, 1000);
        assert_eq!(holding.purchase_date, Some(date(2025, 1, 1)));
        assert_eq!(holding.current_price, dec!(2000));
    }

    #[tokio::test]
    async fn closed_lots_are_not_holdings() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 0));
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-a", "lot-1", 10, dec!(1000), 1));
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        let grouped = service.get_holdings(Some("owner-1")).await.unwrap();
        assert!(grouped.is_empty());
    }

    // --- General behavior ---

    #[tokio::test]
    async fn repeated_reads_return_identical_results() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 6));
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-a", "lot-1", 10, dec!(1000), 1));
        ledger
            .sell_events
            .lock()
            .unwrap()
            .push(sell_event("sell-a", "buy-a", 4, dec!(1300)));
        let quotes = Arc::new(MockQuoteService::with_price(dec!(1250)));
        let service = build_service(ledger, quotes);

        let first = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        let second = service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_owner_is_not_found() {
        let ledger = Arc::new(MockLedger::default());
        let service = build_service(ledger, Arc::new(MockQuoteService::failing()));

        assert!(matches!(
            service.compute_profit_loss(Some("owner-9")).await.unwrap_err(),
            Error::NotFound(_, _)
        ));
    }

    #[tokio::test]
    async fn quote_is_fetched_once_per_stock_code() {
        let ledger = Arc::new(MockLedger::default());
        ledger.lots.lock().unwrap().push(lot("lot-1", 2));
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-a", "lot-1", 2, dec!(1000), 1));
        let mut second_lot = lot("lot-2", 3);
        second_lot.stock_id = "stock-1".to_string();
        ledger.lots.lock().unwrap().push(second_lot);
        ledger
            .buy_events
            .lock()
            .unwrap()
            .push(buy_event("buy-b", "lot-2", 3, dec!(1100), 2));
        let quotes = Arc::new(MockQuoteService::with_price(dec!(1200)));
        let service = build_service(ledger, quotes.clone());

        service.compute_profit_loss(Some("owner-1")).await.unwrap();
        assert_eq!(*quotes.calls.lock().unwrap(), 1);
    }
}
