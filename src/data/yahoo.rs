//! Yahoo Finance data fetcher
//!
//! Fetches free delayed option quotes: the underlying spot, the listed
//! expirations, and per-expiry call/put rows (strike, bid, ask, last).
//! Missing numeric fields are coalesced to zero at this boundary, before any
//! record is constructed.
//!
//! Note: Yahoo Finance data is delayed ~15 minutes and intended for personal
//! use.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ChainError, ChainResult, ChainSet, PriceMode, QuoteContext, RawQuote};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        }
    }

    /// Current spot quote for a symbol
    pub fn get_quote(&self, symbol: &str) -> ChainResult<SpotQuote> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);

        let response: YahooQuoteResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ChainError::network(e.to_string()))?
            .json()
            .map_err(|e| ChainError::data(format!("Failed to parse quote: {}", e)))?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ChainError::data("No quote data returned"))?;

        Ok(SpotQuote {
            symbol: symbol.to_string(),
            price: result.regular_market_price,
            timestamp: Utc::now(),
        })
    }

    /// Listed option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> ChainResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ChainError::network(e.to_string()))?
            .json()
            .map_err(|e| ChainError::data(format!("Failed to parse options: {}", e)))?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ChainError::data("No options data returned"))?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        Ok(expiries)
    }

    /// Raw call and put rows for one expiration, missing fields zeroed.
    pub fn get_chain_rows(
        &self,
        symbol: &str,
        expiry: NaiveDate,
    ) -> ChainResult<(Vec<RawQuote>, Vec<RawQuote>)> {
        let expiry_ts = expiry
            .and_hms_opt(16, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();

        let url = format!("{}/options/{}?date={}", self.base_url, symbol, expiry_ts);

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ChainError::network(e.to_string()))?
            .json()
            .map_err(|e| ChainError::data(format!("Failed to parse options: {}", e)))?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ChainError::data("No options data returned"))?;

        let mut calls = Vec::new();
        let mut puts = Vec::new();

        if let Some(options) = chain_data.options.first() {
            for row in &options.calls {
                calls.push(RawQuote::from_parts(row.strike, row.bid, row.ask, row.last_price));
            }
            for row in &options.puts {
                puts.push(RawQuote::from_parts(row.strike, row.bid, row.ask, row.last_price));
            }
        }

        Ok((calls, puts))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Spot price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates")]
    expiration_dates: Vec<i64>,
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    calls: Vec<YahooOptionRow>,
    puts: Vec<YahooOptionRow>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionRow {
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
}

/// Fetch and solve the full chain set for a ticker: every expiration, every
/// strike, calls and puts.
///
/// Expirations that fail to download are logged and skipped, as are rows
/// whose records cannot be built; the rest of the chain still comes back.
pub fn fetch_chain_set(symbol: &str, price_mode: PriceMode, rate: f64) -> ChainResult<ChainSet> {
    let client = YahooClient::new();

    let spot = client.get_quote(symbol)?;
    let now = Local::now().naive_local();
    let ctx = QuoteContext::new(spot.price, now.date(), now.time(), rate);

    let mut chains = ChainSet::new(symbol, &ctx, price_mode);

    for expiry in client.get_expirations(symbol)? {
        match client.get_chain_rows(symbol, expiry) {
            Ok((calls, puts)) => {
                tracing::info!(
                    "Ingesting {} {}: {} calls, {} puts",
                    symbol,
                    expiry,
                    calls.len(),
                    puts.len()
                );
                chains.ingest_expiration(expiry, &calls, &puts);
            }
            Err(e) => {
                tracing::warn!("Failed to get chain for {}: {}", expiry, e);
            }
        }
    }

    Ok(chains)
}
