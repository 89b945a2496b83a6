//! Raw quote rows and price selection
//!
//! The inbound shape from the data layer: one row per listed contract with
//! bid, ask, last and strike, plus the chain-level snapshot (spot, quote
//! timestamp, rate) shared by every row of an ingestion pass.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ChainError;

/// A single raw option quote row as delivered by the data layer.
///
/// Missing numeric fields are coalesced to zero at the fetch boundary, before
/// any record is constructed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawQuote {
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
    pub last: f64,
}

impl RawQuote {
    pub fn new(strike: f64, bid: f64, ask: f64, last: f64) -> Self {
        Self { strike, bid, ask, last }
    }

    /// Build from optional fields, treating missing values as zero.
    pub fn from_parts(
        strike: Option<f64>,
        bid: Option<f64>,
        ask: Option<f64>,
        last: Option<f64>,
    ) -> Self {
        Self {
            strike: strike.unwrap_or(0.0),
            bid: bid.unwrap_or(0.0),
            ask: ask.unwrap_or(0.0),
            last: last.unwrap_or(0.0),
        }
    }
}

/// Which quoted field becomes the observed price fed to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceMode {
    /// Average of bid and ask
    Mid,
    /// Last traded price
    Last,
}

impl PriceMode {
    /// Select the observed price off a raw row.
    pub fn observed_price(&self, quote: &RawQuote) -> f64 {
        match self {
            PriceMode::Mid => (quote.bid + quote.ask) / 2.0,
            PriceMode::Last => quote.last,
        }
    }
}

impl FromStr for PriceMode {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mid" => Ok(PriceMode::Mid),
            "last" => Ok(PriceMode::Last),
            other => Err(ChainError::invalid_input(format!(
                "Unrecognized price mode: {other} (expected mid or last)"
            ))),
        }
    }
}

/// Chain-level market snapshot shared by every record built in one pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuoteContext {
    /// Underlying spot price
    pub spot: f64,
    /// Quote calendar date
    pub quote_date: NaiveDate,
    /// Quote wall-clock time
    pub quote_time: NaiveTime,
    /// Continuously-compounded risk-free rate
    pub rate: f64,
}

impl QuoteContext {
    pub fn new(spot: f64, quote_date: NaiveDate, quote_time: NaiveTime, rate: f64) -> Self {
        Self { spot, quote_date, quote_time, rate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_zero() {
        let q = RawQuote::from_parts(Some(100.0), None, Some(1.5), None);
        assert_eq!(q.strike, 100.0);
        assert_eq!(q.bid, 0.0);
        assert_eq!(q.ask, 1.5);
        assert_eq!(q.last, 0.0);
    }

    #[test]
    fn test_price_modes() {
        let q = RawQuote::new(100.0, 1.0, 1.5, 1.2);
        assert_eq!(PriceMode::Mid.observed_price(&q), 1.25);
        assert_eq!(PriceMode::Last.observed_price(&q), 1.2);
    }

    #[test]
    fn test_parse_price_mode() {
        assert_eq!("mid".parse::<PriceMode>().unwrap(), PriceMode::Mid);
        assert_eq!(" Last ".parse::<PriceMode>().unwrap(), PriceMode::Last);
        assert!("vwap".parse::<PriceMode>().is_err());
    }
}
