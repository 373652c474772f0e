//! Income module - dividend and shareholder-benefit history.

mod income_model;
mod income_service;
mod income_traits;


// Re-export the public interface
pub use income_model::{BenefitRecord, HistoryAttachment, IncomeRecord, NewBenefit, NewIncome};
pub use income_service::IncomeService;
pub use income_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
