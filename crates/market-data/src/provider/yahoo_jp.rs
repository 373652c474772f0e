//! Yahoo Finance Japan quote provider.
//!
//! The quote page embeds its full data model as a `window.__PRELOADED_STATE__`
//! JSON blob inside a script tag. We fetch the page, pull that blob out, and
//! read the handful of fields we care about with JSON pointers. Listed codes
//! are resolved against the Tokyo exchange (`{code}.T`).

use async_trait::async_trait;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::provider::traits::FinanceProvider;
use crate::throttle::{ProviderConfig, RequestGate};

const BASE_URL: &str = "https://finance.yahoo.co.jp/quote";
const PRELOADED_STATE_PREFIX: &str = "window.__PRELOADED_STATE__ = ";

const PRICE_POINTER: &str = "/mainStocksPriceBoard/priceBoard/price";
const PREVIOUS_CLOSE_POINTER: &str = "/mainStocksPriceBoard/priceBoard/previousPrice";
const NAME_POINTER: &str = "/mainStocksPriceBoard/priceBoard/name";
const DIVIDEND_POINTER: &str = "/mainStocksDetail/referenceIndex/dps";
const EARNINGS_POINTER: &str = "/mainStocksPressReleaseSchedule/pressReleaseScheduleMessage";

lazy_static! {
    /// Matches dates written as `2026年8月7日` in schedule text.
    static ref JP_DATE_REGEX: Regex =
        Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日").expect("Invalid regex pattern");
}

/// Quote provider backed by the Yahoo Finance Japan quote page.
pub struct YahooJpProvider {
    client: reqwest::Client,
    gate: RequestGate,
}

impl YahooJpProvider {
    /// Create a new provider with the given pacing/timeout configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            gate: RequestGate::new(config.request_interval),
        })
    }

    async fn fetch_page(&self, code: &str) -> Result<String, MarketDataError> {
        self.gate.wait().await;

        let url = format!("{}/{}.T", BASE_URL, code);
        debug!("Fetching quote page {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(code.to_string()));
        }
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl FinanceProvider for YahooJpProvider {
    fn id(&self) -> &'static str {
        "YAHOO_JP"
    }

    async fn fetch_quote(&self, code: &str) -> Result<StockQuote, MarketDataError> {
        let body = self.fetch_page(code).await?;
        let state = preloaded_state(&body)?;
        Ok(quote_from_state(&state))
    }

    async fn fetch_name(&self, code: &str) -> Result<Option<String>, MarketDataError> {
        let body = self.fetch_page(code).await?;
        let state = preloaded_state(&body)?;
        Ok(extract_name(&state))
    }
}

/// Locates the preloaded-state script tag and parses its JSON payload.
fn preloaded_state(html: &str) -> Result<Value, MarketDataError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("script").map_err(|e| MarketDataError::Parse(e.to_string()))?;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        let trimmed = text.trim();
        if let Some(json_text) = trimmed.strip_prefix(PRELOADED_STATE_PREFIX) {
            return serde_json::from_str(json_text)
                .map_err(|e| MarketDataError::Parse(format!("preloaded state: {}", e)));
        }
    }

    Err(MarketDataError::Parse(
        "preloaded state script not found".to_string(),
    ))
}

fn quote_from_state(state: &Value) -> StockQuote {
    StockQuote {
        price: decimal_at(state, PRICE_POINTER),
        dividend_per_share: decimal_at(state, DIVIDEND_POINTER),
        earnings_date: extract_earnings_date(state),
        previous_close: decimal_at(state, PREVIOUS_CLOSE_POINTER),
    }
}

/// Reads a decimal field that the page renders either as a JSON number or as
/// a grouped string like `"1,234.5"`.
fn decimal_at(state: &Value, pointer: &str) -> Option<Decimal> {
    match state.pointer(pointer)? {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.replace(',', "").parse().ok(),
        _ => None,
    }
}

fn extract_name(state: &Value) -> Option<String> {
    state
        .pointer(NAME_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|name| !name.is_empty())
}

/// The press-release schedule is free text; the date inside it is the next
/// earnings announcement.
fn extract_earnings_date(state: &Value) -> Option<NaiveDate> {
    let message = state.pointer(EARNINGS_POINTER)?.as_str()?;
    let captures = JP_DATE_REGEX.captures(message)?;

    let year: i32 = captures.get(1)?.as_str().parse().ok()?;
    let month: u32 = captures.get(2)?.as_str().parse().ok()?;
    let day: u32 = captures.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
