use log::{error, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::profitloss_model::{HoldingView, ProfitLossSummary, SaleRecord};
use super::profitloss_traits::ProfitLossServiceTrait;
use crate::constants::CAPITAL_GAINS_TAX_RATE;
use crate::errors::Result;
use crate::income::IncomeRepositoryTrait;
use crate::lots::{lot_is_nisa, BuyEvent, LotRepositoryTrait, SellEvent, StockLot};
use crate::owners::OwnerRepositoryTrait;
use crate::quotes::QuoteServiceTrait;
use crate::stocks::{Stock, StockRepositoryTrait};
use crate::utils::round_money;

/// Applies the capital-gains tax multiplier to non-NISA amounts.
fn net_of_tax(amount: Decimal, is_nisa: bool) -> Decimal {
    if is_nisa {
        amount
    } else {
        round_money(amount * (Decimal::ONE - CAPITAL_GAINS_TAX_RATE))
    }
}

/// Gross gain or loss recognized by one sale event against its purchase
/// event: price difference times shares sold, minus both fees.
fn realized_amount(buy_event: &BuyEvent, sell_event: &SellEvent, minimal_unit: i32) -> Decimal {
    (sell_event.unit_price - buy_event.unit_price)
        * Decimal::from(sell_event.quantity)
        * Decimal::from(minimal_unit)
        - buy_event.fee
        - sell_event.fee
}

/// Average acquisition price per share across all purchase events, fees
/// included, rounded to currency precision. Zero when there are no events.
fn average_price(buy_events: &[BuyEvent]) -> Decimal {
    let total_units: i32 = buy_events.iter().map(|b| b.quantity).sum();
    if total_units <= 0 {
        return Decimal::ZERO;
    }
    let total_cost: Decimal = buy_events
        .iter()
        .map(|b| b.unit_price * Decimal::from(b.quantity) + b.fee)
        .sum();
    round_money(total_cost / Decimal::from(total_units))
}

/// Service computing realized, unrealized, and income figures.
pub struct ProfitLossService {
    lot_repository: Arc<dyn LotRepositoryTrait>,
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    owner_repository: Arc<dyn OwnerRepositoryTrait>,
    stock_repository: Arc<dyn StockRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl ProfitLossService {
    /// Creates a new ProfitLossService instance
    pub fn new(
        lot_repository: Arc<dyn LotRepositoryTrait>,
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        owner_repository: Arc<dyn OwnerRepositoryTrait>,
        stock_repository: Arc<dyn StockRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            lot_repository,
            income_repository,
            owner_repository,
            stock_repository,
            quote_service,
        }
    }

    /// The lots in scope: one owner's, or everyone's.
    fn lots_for(&self, owner_id: Option<&str>) -> Result<Vec<StockLot>> {
        match owner_id {
            Some(owner_id) => {
                let owner = self.owner_repository.get_by_id(owner_id)?;
                self.lot_repository.find_lots_by_owner(&owner.id)
            }
            None => self.lot_repository.list_lots(),
        }
    }

    /// Resolves the valuation price for a stock: live quote when available,
    /// otherwise the stored last-known price. Quote failures and unusable
    /// (missing or zero) quoted prices degrade to the fallback with a
    /// warning; they never fail the calculation.
    async fn resolve_price(
        &self,
        stock: &Stock,
        cache: &mut HashMap<String, Decimal>,
    ) -> Decimal {
        if let Some(price) = cache.get(&stock.code) {
            return *price;
        }
        let price = match self.quote_service.fetch_quote(&stock.code).await {
            Ok(quote) => match quote.usable_price() {
                Some(price) => price,
                None => {
                    warn!(
                        "Quote for {} has no usable price, using last-known {}",
                        stock.code, stock.current_price
                    );
                    stock.current_price
                }
            },
            Err(e) => {
                warn!(
                    "Quote fetch failed for {} ({}), using last-known {}",
                    stock.code, e, stock.current_price
                );
                stock.current_price
            }
        };
        cache.insert(stock.code.clone(), price);
        price
    }
}

#[async_trait::async_trait]
impl ProfitLossServiceTrait for ProfitLossService {
    async fn compute_profit_loss(&self, owner_id: Option<&str>) -> Result<ProfitLossSummary> {
        let lots = self.lots_for(owner_id)?;

        let mut realized = Decimal::ZERO;
        let mut unrealized = Decimal::ZERO;
        let mut income = Decimal::ZERO;
        let mut price_cache: HashMap<String, Decimal> = HashMap::new();

        for lot in &lots {
            let stock = self.stock_repository.get_by_id(&lot.stock_id)?;
            let buy_events = self.lot_repository.find_buy_events_by_lot(&lot.id)?;
            if buy_events.is_empty() {
                error!(
                    "Lot {} has no purchase events; contributing zero cost basis",
                    lot.id
                );
            }
            let nisa = lot_is_nisa(&buy_events);

            // Realized: one figure per booked sale event, taxed by the
            // originating purchase event's own flag.
            for buy_event in &buy_events {
                let sell_events = self
                    .lot_repository
                    .find_sell_events_by_buy_event(&buy_event.id)?;
                for sell_event in &sell_events {
                    let gross = realized_amount(buy_event, sell_event, stock.minimal_unit);
                    realized += net_of_tax(gross, buy_event.is_nisa);
                }
            }

            // Unrealized: open lots marked to the quote price, with the
            // oldest purchase event as cost basis.
            if lot.open_units > 0 {
                if let Some(first_buy) = buy_events.first() {
                    let price = self.resolve_price(&stock, &mut price_cache).await;
                    let gross = (price - first_buy.unit_price)
                        * Decimal::from(lot.open_units)
                        * Decimal::from(stock.minimal_unit);
                    unrealized += net_of_tax(gross, nisa);
                }
            }

            // Income: the lot-attached originals (lifetime view). Copies
            // re-attributed to sales are reported only in the closed-sale
            // breakdown, so nothing is counted twice.
            let dividend_total: Decimal = self
                .income_repository
                .find_income_by_lot(&lot.id)?
                .iter()
                .map(|r| r.amount)
                .sum();
            let benefit_total: Decimal = self
                .income_repository
                .find_benefit_by_lot(&lot.id)?
                .iter()
                .map(|r| r.value)
                .sum();
            income += net_of_tax(dividend_total + benefit_total, nisa);
        }

        Ok(ProfitLossSummary {
            realized,
            unrealized,
            income,
            total: realized + unrealized + income,
        })
    }

    async fn get_closed_sale_breakdown(&self, owner_id: Option<&str>) -> Result<Vec<SaleRecord>> {
        let lots = self.lots_for(owner_id)?;

        let mut records = Vec::new();
        for lot in &lots {
            let stock = self.stock_repository.get_by_id(&lot.stock_id)?;
            let buy_events = self.lot_repository.find_buy_events_by_lot(&lot.id)?;

            for buy_event in &buy_events {
                let sell_events = self
                    .lot_repository
                    .find_sell_events_by_buy_event(&buy_event.id)?;
                for sell_event in &sell_events {
                    let income_total: Decimal = self
                        .income_repository
                        .find_income_by_sell_event(&sell_event.id)?
                        .iter()
                        .map(|r| r.amount)
                        .sum();
                    let benefit_total: Decimal = self
                        .income_repository
                        .find_benefit_by_sell_event(&sell_event.id)?
                        .iter()
                        .map(|r| r.value)
                        .sum();

                    let gross = realized_amount(buy_event, sell_event, stock.minimal_unit);
                    records.push(SaleRecord {
                        sell_event_id: sell_event.id.clone(),
                        lot_id: lot.id.clone(),
                        stock_code: stock.code.clone(),
                        stock_name: stock.name.clone(),
                        quantity: sell_event.quantity,
                        buy_unit_price: buy_event.unit_price,
                        sell_unit_price: sell_event.unit_price,
                        buy_fee: buy_event.fee,
                        sell_fee: sell_event.fee,
                        buy_date: buy_event.transaction_date,
                        sell_date: sell_event.transaction_date,
                        is_nisa: buy_event.is_nisa,
                        realized: net_of_tax(gross, buy_event.is_nisa),
                        income: net_of_tax(income_total, buy_event.is_nisa),
                        benefit: net_of_tax(benefit_total, buy_event.is_nisa),
                    });
                }
            }
        }

        records.sort_by(|a, b| {
            (a.sell_date, &a.sell_event_id).cmp(&(b.sell_date, &b.sell_event_id))
        });
        Ok(records)
    }

    async fn get_holdings(
        &self,
        owner_id: Option<&str>,
    ) -> Result<HashMap<bool, Vec<HoldingView>>> {
        let lots = self.lots_for(owner_id)?;

        let mut holdings = Vec::new();
        let mut price_cache: HashMap<String, Decimal> = HashMap::new();
        for lot in &lots {
            if lot.open_units <= 0 {
                continue;
            }
            let owner = self.owner_repository.get_by_id(&lot.owner_id)?;
            let stock = self.stock_repository.get_by_id(&lot.stock_id)?;
            let buy_events = self.lot_repository.find_buy_events_by_lot(&lot.id)?;

            let acquisition = average_price(&buy_events);
            let current_price = self.resolve_price(&stock, &mut price_cache).await;
            let quantity = lot.open_units * stock.minimal_unit;
            let profit_loss = (current_price - acquisition) * Decimal::from(quantity);

            let dividend: Decimal = self
                .income_repository
                .find_income_by_lot(&lot.id)?
                .iter()
                .map(|r| r.amount)
                .sum();
            let benefit: Decimal = self
                .income_repository
                .find_benefit_by_lot(&lot.id)?
                .iter()
                .map(|r| r.value)
                .sum();

            holdings.push(HoldingView {
                lot_id: lot.id.clone(),
                owner_id: owner.id,
                owner_name: owner.name,
                stock_code: stock.code.clone(),
                stock_name: stock.name.clone(),
                open_units: lot.open_units,
                quantity,
                is_nisa: lot_is_nisa(&buy_events),
                average_price: acquisition,
                current_price,
                profit_loss,
                dividend,
                benefit,
                purchase_date: buy_events.first().map(|b| b.transaction_date),
            });
        }

        let mut grouped: HashMap<bool, Vec<HoldingView>> = HashMap::new();
        for holding in holdings {
            grouped.entry(holding.is_nisa).or_default().push(holding);
        }
        Ok(grouped)
    }
}
