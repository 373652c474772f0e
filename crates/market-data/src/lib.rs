//! Kabutrack Market Data Crate
//!
//! Provider plumbing for fetching Japanese equity quotes. The crate exposes
//! a provider-agnostic [`FinanceProvider`] trait plus the Yahoo Finance Japan
//! implementation that scrapes the quote page's preloaded state.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+
//! |   Domain Layer   | --> | FinanceProvider  |  (trait)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | YahooJpProvider  |  (scrape + throttle)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   StockQuote     |  (all fields optional)
//!                          +------------------+
//! ```
//!
//! Every field of [`StockQuote`] is optional; callers own the fallback
//! policy. The provider never substitutes zero for missing data.

pub mod errors;
pub mod models;
pub mod provider;
pub mod throttle;

pub use errors::MarketDataError;
pub use models::StockQuote;
pub use provider::{FinanceProvider, YahooJpProvider};
pub use throttle::{ProviderConfig, RequestGate};
