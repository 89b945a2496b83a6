//! Error types for chain-greeks

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate expiry: {0}")]
    DegenerateExpiry(String),

    #[error("Implied volatility not found: {0}")]
    NoConvergence(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ChainResult<T> = Result<T, ChainError>;

impl ChainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn degenerate_expiry(msg: impl Into<String>) -> Self {
        Self::DegenerateExpiry(msg.into())
    }

    pub fn no_convergence(msg: impl Into<String>) -> Self {
        Self::NoConvergence(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
