use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::stocks;

use kabutrack_core::errors::{Error, Result};
use kabutrack_core::stocks::{NewStock, Stock, StockRepositoryTrait};

use super::model::StockDB;

/// Repository for managing stock reference data in the database
pub struct StockRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StockRepository {
    /// Creates a new StockRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl StockRepositoryTrait for StockRepository {
    async fn create(&self, new_stock: NewStock) -> Result<Stock> {
        new_stock.validate()?;

        let mut stock_db: StockDB = new_stock.into();
        if stock_db.id.is_empty() {
            stock_db.id = uuid::Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn| {
                diesel::insert_into(stocks::table)
                    .values(&stock_db)
                    .execute(conn)
                    .into_core()?;
                stock_db.try_into()
            })
            .await
    }

    async fn update(&self, stock: Stock) -> Result<Stock> {
        let stock_db = StockDB::from(&stock);
        self.writer
            .exec(move |conn| {
                diesel::update(stocks::table.find(&stock_db.id))
                    .set(&stock_db)
                    .execute(conn)
                    .into_core()?;
                stock_db.try_into()
            })
            .await
    }

    fn get_by_id(&self, stock_id: &str) -> Result<Stock> {
        let mut conn = get_connection(&self.pool)?;

        let stock = stocks::table
            .select(StockDB::as_select())
            .find(stock_id)
            .first::<StockDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound("Stock", stock_id.to_string()))?;

        stock.try_into()
    }

    fn find_by_code(&self, stock_code: &str) -> Result<Option<Stock>> {
        let mut conn = get_connection(&self.pool)?;

        stocks::table
            .select(StockDB::as_select())
            .filter(stocks::code.eq(stock_code))
            .first::<StockDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Stock::try_from)
            .transpose()
    }

    fn list(&self) -> Result<Vec<Stock>> {
        let mut conn = get_connection(&self.pool)?;

        let results = stocks::table
            .select(StockDB::as_select())
            .order(stocks::code.asc())
            .load::<StockDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(Stock::try_from).collect()
    }
}
