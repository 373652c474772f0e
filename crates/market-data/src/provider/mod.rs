//! Quote provider implementations.

mod traits;
mod yahoo_jp;

pub use traits::FinanceProvider;
pub use yahoo_jp::YahooJpProvider;
