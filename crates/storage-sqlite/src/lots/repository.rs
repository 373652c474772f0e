use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::income::{BenefitRecordDB, IncomeRecordDB};
use crate::schema::{benefit_records, buy_events, income_records, sell_events, stock_lots};

use kabutrack_core::errors::{Error, Result};
use kabutrack_core::lots::{
    BuyEvent, LotRepositoryTrait, PurchasePlan, SalePlan, SellEvent, StockLot,
};

use super::model::{BuyEventDB, SellEventDB, StockLotDB};

/// Repository for lots and their purchase/sale events.
///
/// The commit methods re-validate their optimistic preconditions inside the
/// writer transaction and fail with `Error::Conflict` when a concurrent
/// writer got there first; the service layer replans and retries.
pub struct LotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LotRepository {
    /// Creates a new LotRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_lot(conn: &mut SqliteConnection, lot_id: &str) -> Result<StockLotDB> {
    stock_lots::table
        .select(StockLotDB::as_select())
        .find(lot_id)
        .first::<StockLotDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound("StockLot", lot_id.to_string()))
}

/// Units of a purchase event already consumed by booked sale events.
fn units_sold(conn: &mut SqliteConnection, buy_event_id: &str) -> Result<i64> {
    let sold: Option<i64> = sell_events::table
        .filter(sell_events::buy_event_id.eq(buy_event_id))
        .select(diesel::dsl::sum(sell_events::quantity))
        .first(conn)
        .into_core()?;
    Ok(sold.unwrap_or(0))
}

#[async_trait]
impl LotRepositoryTrait for LotRepository {
    fn get_lot(&self, lot_id: &str) -> Result<StockLot> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_lot(&mut conn, lot_id)?.into())
    }

    fn list_lots(&self) -> Result<Vec<StockLot>> {
        let mut conn = get_connection(&self.pool)?;

        let results = stock_lots::table
            .select(StockLotDB::as_select())
            .load::<StockLotDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(StockLot::from).collect())
    }

    fn find_lots_by_owner(&self, owner_id: &str) -> Result<Vec<StockLot>> {
        let mut conn = get_connection(&self.pool)?;

        let results = stock_lots::table
            .select(StockLotDB::as_select())
            .filter(stock_lots::owner_id.eq(owner_id))
            .load::<StockLotDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(StockLot::from).collect())
    }

    fn find_lot_by_owner_and_stock(
        &self,
        owner_id: &str,
        stock_id: &str,
    ) -> Result<Option<StockLot>> {
        let mut conn = get_connection(&self.pool)?;

        let result = stock_lots::table
            .select(StockLotDB::as_select())
            .filter(stock_lots::owner_id.eq(owner_id))
            .filter(stock_lots::stock_id.eq(stock_id))
            .first::<StockLotDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(result.map(StockLot::from))
    }

    fn find_buy_events_by_lot(&self, lot_id: &str) -> Result<Vec<BuyEvent>> {
        let mut conn = get_connection(&self.pool)?;

        let results = buy_events::table
            .select(BuyEventDB::as_select())
            .filter(buy_events::lot_id.eq(lot_id))
            .order(buy_events::transaction_date.asc())
            .load::<BuyEventDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(BuyEvent::try_from).collect()
    }

    fn find_sell_events_by_buy_event(&self, buy_event_id: &str) -> Result<Vec<SellEvent>> {
        let mut conn = get_connection(&self.pool)?;

        let results = sell_events::table
            .select(SellEventDB::as_select())
            .filter(sell_events::buy_event_id.eq(buy_event_id))
            .order(sell_events::transaction_date.asc())
            .load::<SellEventDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(SellEvent::try_from).collect()
    }

    async fn commit_purchase(&self, plan: PurchasePlan) -> Result<StockLot> {
        self.writer
            .exec(move |conn| match plan {
                PurchasePlan::NewLot { lot, buy_event } => {
                    let inserted = diesel::insert_into(stock_lots::table)
                        .values(StockLotDB::from(&lot))
                        .execute(conn);
                    match inserted {
                        // A concurrent purchase created the owner's lot for
                        // this stock first; the caller replans against it.
                        Err(DieselError::DatabaseError(
                            DatabaseErrorKind::UniqueViolation,
                            info,
                        )) => {
                            return Err(Error::Conflict(format!(
                                "lot already exists for owner {} and stock {}: {}",
                                lot.owner_id,
                                lot.stock_id,
                                info.message()
                            )))
                        }
                        other => {
                            other.into_core()?;
                        }
                    }
                    diesel::insert_into(buy_events::table)
                        .values(BuyEventDB::from(&buy_event))
                        .execute(conn)
                        .into_core()?;
                    Ok(lot)
                }
                PurchasePlan::ExistingLot {
                    lot_id,
                    expected_open_units,
                    new_open_units,
                    buy_event,
                } => {
                    let lot = load_lot(conn, &lot_id)?;
                    if lot.open_units != expected_open_units {
                        return Err(Error::Conflict(format!(
                            "lot {} open units moved from {} to {}",
                            lot_id, expected_open_units, lot.open_units
                        )));
                    }
                    diesel::update(stock_lots::table.find(&lot_id))
                        .set(stock_lots::open_units.eq(new_open_units))
                        .execute(conn)
                        .into_core()?;
                    diesel::insert_into(buy_events::table)
                        .values(BuyEventDB::from(&buy_event))
                        .execute(conn)
                        .into_core()?;
                    Ok(StockLot {
                        open_units: new_open_units,
                        ..lot.into()
                    })
                }
            })
            .await
    }

    async fn commit_sale(&self, plan: SalePlan) -> Result<Vec<SellEvent>> {
        self.writer
            .exec(move |conn| {
                let SalePlan {
                    lot_id,
                    expected_open_units,
                    new_open_units,
                    sell_events: planned_events,
                    income_copies,
                    benefit_copies,
                } = plan;

                let lot = load_lot(conn, &lot_id)?;
                if lot.open_units != expected_open_units {
                    return Err(Error::Conflict(format!(
                        "lot {} open units moved from {} to {}",
                        lot_id, expected_open_units, lot.open_units
                    )));
                }
                if new_open_units < 0 {
                    return Err(Error::Conflict(format!(
                        "lot {} would go negative ({} units)",
                        lot_id, new_open_units
                    )));
                }

                // Each planned event must still fit into its purchase
                // event's remaining quantity at commit time.
                for planned in &planned_events {
                    let buy_event = buy_events::table
                        .select(BuyEventDB::as_select())
                        .find(&planned.buy_event_id)
                        .first::<BuyEventDB>(conn)
                        .optional()
                        .into_core()?
                        .ok_or_else(|| {
                            Error::NotFound("BuyEvent", planned.buy_event_id.clone())
                        })?;
                    if buy_event.lot_id != lot_id {
                        return Err(Error::InvariantViolation(format!(
                            "buy event {} belongs to lot {}, not {}",
                            buy_event.id, buy_event.lot_id, lot_id
                        )));
                    }
                    let remaining =
                        i64::from(buy_event.quantity) - units_sold(conn, &buy_event.id)?;
                    if i64::from(planned.quantity) > remaining {
                        return Err(Error::Conflict(format!(
                            "buy event {} has {} units remaining, plan needs {}",
                            buy_event.id, remaining, planned.quantity
                        )));
                    }
                }

                for planned in &planned_events {
                    diesel::insert_into(sell_events::table)
                        .values(SellEventDB::from(planned))
                        .execute(conn)
                        .into_core()?;
                }
                for record in &income_copies {
                    diesel::insert_into(income_records::table)
                        .values(IncomeRecordDB::from(record))
                        .execute(conn)
                        .into_core()?;
                }
                for record in &benefit_copies {
                    diesel::insert_into(benefit_records::table)
                        .values(BenefitRecordDB::from(record))
                        .execute(conn)
                        .into_core()?;
                }
                diesel::update(stock_lots::table.find(&lot_id))
                    .set(stock_lots::open_units.eq(new_open_units))
                    .execute(conn)
                    .into_core()?;

                Ok(planned_events)
            })
            .await
    }
}
