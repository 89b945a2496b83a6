//! Option kind and payoff helpers
//!
//! The kind is an exhaustive two-variant enum matched at every branch point, so
//! an unrecognized kind is unrepresentable rather than silently priced as a call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ChainError;

/// Option kind (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    /// Moneyness: a call is in the money when the strike is at or below spot,
    /// a put when the strike is above spot.
    pub fn is_itm(&self, spot: f64, strike: f64) -> bool {
        match self {
            OptionKind::Call => strike <= spot,
            OptionKind::Put => strike > spot,
        }
    }

    /// Single-letter chain label suffix ("C" / "P")
    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::Call => "C",
            OptionKind::Put => "P",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            other => Err(ChainError::invalid_input(format!(
                "Unrecognized option kind: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_and_intrinsic() {
        assert_eq!(OptionKind::Call.phi(), 1.0);
        assert_eq!(OptionKind::Put.phi(), -1.0);

        assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionKind::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionKind::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_moneyness() {
        // Call: ITM at or below spot
        assert!(OptionKind::Call.is_itm(100.0, 95.0));
        assert!(OptionKind::Call.is_itm(100.0, 100.0));
        assert!(!OptionKind::Call.is_itm(100.0, 105.0));

        // Put: ITM strictly above spot
        assert!(OptionKind::Put.is_itm(100.0, 105.0));
        assert!(!OptionKind::Put.is_itm(100.0, 100.0));
        assert!(!OptionKind::Put.is_itm(100.0, 95.0));
    }

    #[test]
    fn test_parse() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!("P".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert!("straddle".parse::<OptionKind>().is_err());
    }
}
