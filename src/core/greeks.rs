//! Option Greeks
//!
//! The full sensitivity battery carried by every finalized record: first order
//! (delta, vega, theta, rho), second order (gamma, vanna, charm, vomma, veta)
//! and third order (speed, zomma, color, ultima), plus elasticity (lambda).

use serde::{Deserialize, Serialize};

/// Stable field names, in reporting order. The visualization layer iterates
/// this list and reads each value back through [`Greeks::by_name`].
pub const GREEK_FIELDS: &[&str] = &[
    "delta", "gamma", "theta", "rho", "vega", "lambda", "vanna", "charm", "vomma", "veta",
    "speed", "zomma", "color", "ultima",
];

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt, per day
    pub theta: f64,
    /// Rho: dV/dr, per 1% rate move
    pub rho: f64,
    /// Vega: dV/dσ, per 1 vol-point
    pub vega: f64,
    /// Lambda: elasticity, delta · S / price
    pub lambda: f64,
    /// Vanna: d²V/dSdσ
    pub vanna: f64,
    /// Charm: d²V/dSdt (delta decay), per day
    pub charm: f64,
    /// Vomma: d²V/dσ² (sensitivity of vega to vol)
    pub vomma: f64,
    /// Veta: d²V/dσdt (vega decay), per day per vol-point
    pub veta: f64,
    /// Speed: d³V/dS³ (sensitivity of gamma to spot)
    pub speed: f64,
    /// Zomma: d³V/dS²dσ (sensitivity of gamma to vol)
    pub zomma: f64,
    /// Color: d³V/dS²dt (gamma decay), per day
    pub color: f64,
    /// Ultima: d³V/dσ³
    pub ultima: f64,
}

impl Greeks {
    /// Read a Greek by its stable field name.
    pub fn by_name(&self, name: &str) -> Option<f64> {
        match name {
            "delta" => Some(self.delta),
            "gamma" => Some(self.gamma),
            "theta" => Some(self.theta),
            "rho" => Some(self.rho),
            "vega" => Some(self.vega),
            "lambda" => Some(self.lambda),
            "vanna" => Some(self.vanna),
            "charm" => Some(self.charm),
            "vomma" => Some(self.vomma),
            "veta" => Some(self.veta),
            "speed" => Some(self.speed),
            "zomma" => Some(self.zomma),
            "color" => Some(self.color),
            "ultima" => Some(self.ultima),
            _ => None,
        }
    }

    /// Round every field to the reporting precision (4 decimals). Applied once
    /// at the storage boundary, never to values reused in computation.
    pub fn rounded(&self) -> Self {
        fn r4(x: f64) -> f64 {
            (x * 10_000.0).round() / 10_000.0
        }
        Self {
            delta: r4(self.delta),
            gamma: r4(self.gamma),
            theta: r4(self.theta),
            rho: r4(self.rho),
            vega: r4(self.vega),
            lambda: r4(self.lambda),
            vanna: r4(self.vanna),
            charm: r4(self.charm),
            vomma: r4(self.vomma),
            veta: r4(self.veta),
            speed: r4(self.speed),
            zomma: r4(self.zomma),
            color: r4(self.color),
            ultima: r4(self.ultima),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_covers_every_field() {
        let g = Greeks { delta: 0.5, gamma: 0.02, ..Default::default() };

        for field in GREEK_FIELDS {
            assert!(g.by_name(field).is_some(), "missing field {field}");
        }
        assert_eq!(g.by_name("delta"), Some(0.5));
        assert_eq!(g.by_name("gamma"), Some(0.02));
        assert_eq!(g.by_name("epsilon"), None);
    }

    #[test]
    fn test_rounding() {
        let g = Greeks { delta: 0.123456, theta: -0.00005, ..Default::default() };
        let r = g.rounded();
        assert_eq!(r.delta, 0.1235);
        assert_eq!(r.theta, -0.0001);
    }
}
