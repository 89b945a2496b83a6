//! Pricing models
//!
//! Black-Scholes-Merton closed-form pricing with the analytic Greeks battery,
//! and the bisection solver that inverts it for implied volatility.

pub mod black_scholes;
pub mod implied_vol;

pub use black_scholes::{norm_cdf, norm_pdf, DIVIDEND_YIELD};
pub use implied_vol::{implied_volatility, IvSolution};
