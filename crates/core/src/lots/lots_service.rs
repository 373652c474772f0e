use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::allocation::{allocate, OpenBuyEvent};
use super::history::copy_history_to_sale;
use super::lots_model::{
    BuyEvent, PurchasePlan, PurchaseRequest, SalePlan, SellEvent, SellRequest, StockLot,
};
use super::lots_traits::{LotRepositoryTrait, LotServiceTrait};
use crate::constants::SALE_COMMIT_ATTEMPTS;
use crate::errors::{Error, Result};
use crate::income::IncomeRepositoryTrait;
use crate::owners::OwnerRepositoryTrait;
use crate::stocks::StockRepositoryTrait;

/// Service driving the lot allocation engine.
///
/// Plans are computed from a consistent read of the lot's event history and
/// committed through the repository in a single transaction. A commit whose
/// preconditions were invalidated by a concurrent writer fails with
/// `Error::Conflict` and is re-planned from fresh state, a bounded number of
/// times.
pub struct LotService {
    lot_repository: Arc<dyn LotRepositoryTrait>,
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    owner_repository: Arc<dyn OwnerRepositoryTrait>,
    stock_repository: Arc<dyn StockRepositoryTrait>,
}

impl LotService {
    /// Creates a new LotService instance
    pub fn new(
        lot_repository: Arc<dyn LotRepositoryTrait>,
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        owner_repository: Arc<dyn OwnerRepositoryTrait>,
        stock_repository: Arc<dyn StockRepositoryTrait>,
    ) -> Self {
        Self {
            lot_repository,
            income_repository,
            owner_repository,
            stock_repository,
        }
    }

    /// Loads each purchase event with its unconsumed quantity, in the
    /// repository's ascending date order.
    fn load_open_events(&self, lot_id: &str) -> Result<Vec<OpenBuyEvent>> {
        let buy_events = self.lot_repository.find_buy_events_by_lot(lot_id)?;
        let mut open_events = Vec::with_capacity(buy_events.len());
        for buy_event in buy_events {
            let sold: i32 = self
                .lot_repository
                .find_sell_events_by_buy_event(&buy_event.id)?
                .iter()
                .map(|sell| sell.quantity)
                .sum();
            open_events.push(OpenBuyEvent {
                remaining: buy_event.quantity - sold,
                buy_event,
            });
        }
        Ok(open_events)
    }

    fn plan_sale(&self, lot: &StockLot, request: &SellRequest) -> Result<SalePlan> {
        let open_events = self.load_open_events(&lot.id)?;

        let available: i32 = open_events.iter().map(|open| open.remaining.max(0)).sum();
        if available != lot.open_units {
            warn!(
                "Lot {} open_units={} diverges from event history ({})",
                lot.id, lot.open_units, available
            );
        }

        let allocations = allocate(&lot.id, &open_events, request)?;

        let incomes = self.income_repository.find_income_by_lot(&lot.id)?;
        let benefits = self.income_repository.find_benefit_by_lot(&lot.id)?;

        let mut sell_events = Vec::with_capacity(allocations.len());
        let mut income_copies = Vec::new();
        let mut benefit_copies = Vec::new();
        for allocation in allocations {
            let sell_event = SellEvent {
                id: Uuid::new_v4().to_string(),
                buy_event_id: allocation.buy_event.id.clone(),
                quantity: allocation.quantity,
                unit_price: request.unit_price,
                fee: allocation.fee,
                transaction_date: request.transaction_date,
            };
            let (incomes_for_sale, benefits_for_sale) =
                copy_history_to_sale(&sell_event.id, &incomes, &benefits);
            income_copies.extend(incomes_for_sale);
            benefit_copies.extend(benefits_for_sale);
            sell_events.push(sell_event);
        }

        Ok(SalePlan {
            lot_id: lot.id.clone(),
            expected_open_units: lot.open_units,
            new_open_units: lot.open_units - request.quantity,
            sell_events,
            income_copies,
            benefit_copies,
        })
    }
}

#[async_trait::async_trait]
impl LotServiceTrait for LotService {
    /// Records a purchase against the owner's lot for the stock
    async fn record_purchase(&self, request: PurchaseRequest) -> Result<StockLot> {
        request.validate()?;
        let owner = self.owner_repository.get_by_id(&request.owner_id)?;
        let stock = self.stock_repository.get_by_id(&request.stock_id)?;

        let mut attempt = 0;
        loop {
            attempt += 1;

            let buy_event = BuyEvent {
                id: Uuid::new_v4().to_string(),
                lot_id: String::new(),
                quantity: request.quantity,
                unit_price: request.unit_price,
                fee: request.fee,
                is_nisa: request.is_nisa,
                transaction_date: request.transaction_date,
            };

            let plan = match self
                .lot_repository
                .find_lot_by_owner_and_stock(&owner.id, &stock.id)?
            {
                Some(lot) => PurchasePlan::ExistingLot {
                    expected_open_units: lot.open_units,
                    new_open_units: lot.open_units + request.quantity,
                    buy_event: BuyEvent {
                        lot_id: lot.id.clone(),
                        ..buy_event
                    },
                    lot_id: lot.id,
                },
                None => {
                    let lot = StockLot {
                        id: Uuid::new_v4().to_string(),
                        owner_id: owner.id.clone(),
                        stock_id: stock.id.clone(),
                        open_units: request.quantity,
                    };
                    PurchasePlan::NewLot {
                        buy_event: BuyEvent {
                            lot_id: lot.id.clone(),
                            ..buy_event
                        },
                        lot,
                    }
                }
            };

            match self.lot_repository.commit_purchase(plan).await {
                Ok(lot) => {
                    info!(
                        "Recorded purchase of {} units of {} for owner {} (lot {})",
                        request.quantity, stock.code, owner.name, lot.id
                    );
                    return Ok(lot);
                }
                Err(Error::Conflict(reason)) if attempt < SALE_COMMIT_ATTEMPTS => {
                    warn!("Purchase commit conflict, replanning: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Sells units from a lot, drawing purchase events down oldest-first
    async fn sell_lot(&self, lot_id: &str, request: SellRequest) -> Result<Vec<SellEvent>> {
        request.validate()?;

        let mut attempt = 0;
        loop {
            attempt += 1;

            let lot = self.lot_repository.get_lot(lot_id)?;
            let plan = self.plan_sale(&lot, &request)?;
            let event_count = plan.sell_events.len();

            match self.lot_repository.commit_sale(plan).await {
                Ok(sell_events) => {
                    info!(
                        "Sold {} units from lot {} across {} sale event(s)",
                        request.quantity, lot_id, event_count
                    );
                    return Ok(sell_events);
                }
                Err(Error::Conflict(reason)) if attempt < SALE_COMMIT_ATTEMPTS => {
                    warn!("Sale commit conflict on lot {}, replanning: {}", lot_id, reason);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Retrieves a lot by its ID
    fn get_lot(&self, lot_id: &str) -> Result<StockLot> {
        self.lot_repository.get_lot(lot_id)
    }

    /// Lists all lots
    fn list_lots(&self) -> Result<Vec<StockLot>> {
        self.lot_repository.list_lots()
    }

    /// Lists an owner's lots
    fn find_lots_by_owner(&self, owner_id: &str) -> Result<Vec<StockLot>> {
        self.lot_repository.find_lots_by_owner(owner_id)
    }

    /// Verifies the lot's stored open-unit count against its event history
    fn check_lot_integrity(&self, lot_id: &str) -> Result<()> {
        let lot = self.lot_repository.get_lot(lot_id)?;
        let open_events = self.load_open_events(lot_id)?;

        let mut derived = 0;
        for open in &open_events {
            if open.remaining < 0 {
                return Err(Error::InvariantViolation(format!(
                    "Buy event {} oversold: remaining={}",
                    open.buy_event.id, open.remaining
                )));
            }
            derived += open.remaining;
        }

        if derived != lot.open_units {
            return Err(Error::InvariantViolation(format!(
                "Lot {}: open_units={} but event history yields {}",
                lot.id, lot.open_units, derived
            )));
        }
        Ok(())
    }
}
