//! Profit/loss module - realized, unrealized, and income calculations.

mod profitloss_model;
mod profitloss_service;
mod profitloss_traits;

#[cfg(test)]
mod profitloss_service_tests;

// Re-export the public interface
pub use profitloss_model::{HoldingView, ProfitLossSummary, SaleRecord};
pub use profitloss_service::ProfitLossService;
pub use profitloss_traits::ProfitLossServiceTrait;
