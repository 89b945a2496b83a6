//! Data fetching and storage
//!
//! Handles:
//! - Yahoo Finance API for option chains (free, delayed)
//! - Local caching of solved chain sets

pub mod cache;
pub mod yahoo;

pub use cache::*;
pub use yahoo::*;
