//! # Chain Greeks - Implied Volatility and Greeks for Option Chains
//!
//! A library for pricing listed equity options from observed market quotes:
//! given a quoted price, spot, strike, expiration and kind, it recovers the
//! market-implied volatility and evaluates a full battery of first-, second-
//! and third-order sensitivities.
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance option chains with local caching
//! - **Black-Scholes**: closed-form pricing and analytic Greeks
//! - **Implied Volatility**: bisection inversion of the pricing model
//! - **Option Records**: one immutable snapshot per contract, partitioned by
//!   expiration and kind for downstream plotting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chain_greeks::prelude::*;
//!
//! // Fetch SPY options from Yahoo Finance and solve the whole chain
//! let chains = fetch_chain_set("SPY", PriceMode::Mid, 0.02).unwrap();
//!
//! for (label, records) in &chains.call_options {
//!     for record in records {
//!         println!(
//!             "{label} {}: iv={:.4} delta={:.4}",
//!             record.strike, record.implied_volatility, record.greeks.delta
//!         );
//!     }
//! }
//! ```
//!
//! ## What This Library Does
//!
//! - Solves implied volatility per contract by bisection
//! - Computes delta, gamma, theta, rho, vega, lambda, vanna, charm, vomma,
//!   veta, speed, zomma, color and ultima analytically
//! - Builds whole-chain record sets suitable for plotting across strikes
//!
//! ## What This Library Does NOT Do
//!
//! - Model American early exercise (European formulas throughout)
//! - Handle dividends beyond a constant continuous yield (fixed at zero)
//! - Stochastic or local volatility
//! - Multi-leg or portfolio aggregation

pub mod core;
pub mod data;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        chain_label, ChainError, ChainResult, ChainSet, Greeks, OptionKind, OptionRecord,
        PriceMode, QuoteContext, RawQuote, GREEK_FIELDS, RECORD_FIELDS,
    };

    // Time normalization
    pub use crate::core::time::time_to_expiration;

    // Data fetching
    pub use crate::data::{
        fetch_chain_set, CacheConfig, CachedFetcher, DataCache, SpotQuote, YahooClient,
    };

    // Models
    pub use crate::models::{
        black_scholes::{self, norm_cdf, norm_pdf},
        implied_volatility, IvSolution, DIVIDEND_YIELD,
    };
}

// Re-export main types at crate root
pub use crate::core::{ChainError, ChainResult, ChainSet, OptionRecord};
