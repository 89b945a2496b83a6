//! Core data types for chain-greeks
//!
//! Defines fundamental types:
//! - OptionKind: call/put with payoff and moneyness helpers
//! - RawQuote / PriceMode: inbound rows and observed-price selection
//! - OptionRecord: solved implied volatility plus the full Greeks battery
//! - ChainSet: records partitioned by expiration and kind

pub mod chain;
pub mod error;
pub mod greeks;
pub mod option;
pub mod quote;
pub mod record;
pub mod time;

pub use chain::*;
pub use error::*;
pub use greeks::*;
pub use option::*;
pub use quote::*;
pub use record::*;
pub use time::*;
