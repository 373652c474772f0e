//! Kabutrack Core - Domain entities, services, and traits.
//!
//! This crate contains the lot accounting engine: owners hold stock lots,
//! purchases accumulate under a lot, sales draw the lot down FIFO across its
//! purchase events, and dividend/benefit history is re-attributed to closed
//! sales. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod income;
pub mod lots;
pub mod owners;
pub mod profitloss;
pub mod quotes;
pub mod stocks;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
