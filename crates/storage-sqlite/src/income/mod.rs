//! Income and benefit history storage.

mod model;
mod repository;

pub use model::{BenefitRecordDB, IncomeRecordDB};
pub use repository::IncomeRepository;
