//! Lot, purchase-event, and sale-event storage.

mod model;
mod repository;

pub use model::{BuyEventDB, SellEventDB, StockLotDB};
pub use repository::LotRepository;
