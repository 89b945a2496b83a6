//! Implied volatility solver
//!
//! Inverts the Black-Scholes-Merton price by bisection over a deliberately
//! wide volatility bracket, so any realistic quote is bracketed from the first
//! iteration. The solved volatility and the vega evaluated there come back
//! together; the record reuses the vega rather than recomputing it.

use crate::core::{ChainError, ChainResult, OptionKind};
use crate::models::black_scholes::{price, pv_spot, pv_strike, vega};

/// Lower edge of the volatility bracket.
pub const VOL_LOW: f64 = 0.0;
/// Upper edge of the volatility bracket: 2000%, wide enough for any listed quote.
pub const VOL_HIGH: f64 = 20.0;
/// Convergence tolerance on the bracket width: 0.1 vol-points.
pub const VOL_TOLERANCE: f64 = 0.001;
/// Hard iteration cap. Halving [0, 20] reaches the tolerance in ~15 steps;
/// the cap only exists so pathological inputs surface as errors instead of
/// spinning.
pub const MAX_ITERATIONS: usize = 100;

/// Solved volatility plus the vega at that volatility.
#[derive(Debug, Clone, Copy)]
pub struct IvSolution {
    /// Annualized implied volatility
    pub sigma: f64,
    /// Vega at the solved volatility, per 1 vol-point
    pub vega: f64,
}

/// Recover the volatility that reproduces an observed option price.
///
/// Rejects quotes no volatility can explain (non-positive, below discounted
/// intrinsic, at or above the no-arbitrage upper bound) before bisecting, so
/// the bracket always contains a root. Iterations evaluate the full-precision
/// price; rounding never enters the loop.
pub fn implied_volatility(
    observed: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    time: f64,
    kind: OptionKind,
) -> ChainResult<IvSolution> {
    if !observed.is_finite() || !spot.is_finite() || !strike.is_finite() {
        return Err(ChainError::invalid_input("Non-finite solver input"));
    }
    if spot <= 0.0 || strike <= 0.0 {
        return Err(ChainError::invalid_input("Non-positive spot or strike"));
    }
    if time <= 0.0 {
        return Err(ChainError::degenerate_expiry(
            "Non-positive time to expiration",
        ));
    }
    if observed <= 0.0 {
        return Err(ChainError::invalid_input("Non-positive option price"));
    }

    // Price bounds: below the zero-vol price or at/above the infinite-vol
    // price, no volatility in the bracket can match.
    let floor = price(spot, strike, rate, div, 0.0, time, kind);
    let ceiling = match kind {
        OptionKind::Call => pv_spot(spot, div, time),
        OptionKind::Put => pv_strike(strike, rate, time),
    };
    if observed < floor {
        return Err(ChainError::no_convergence(format!(
            "Price {observed} below zero-volatility value {floor:.6}"
        )));
    }
    if observed >= ceiling {
        return Err(ChainError::no_convergence(format!(
            "Price {observed} at or above upper bound {ceiling:.6}"
        )));
    }

    let mut low = VOL_LOW;
    let mut high = VOL_HIGH;
    let mut mid = 0.5 * (low + high);
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let diff = price(spot, strike, rate, div, mid, time, kind) - observed;

        if diff == 0.0 {
            // Exact hit, floating-point rare but terminal
            converged = true;
            break;
        } else if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }

        if high - low < VOL_TOLERANCE {
            converged = true;
            break;
        }
        mid = 0.5 * (low + high);
    }

    if !converged {
        return Err(ChainError::no_convergence(format!(
            "Bisection did not converge within {MAX_ITERATIONS} iterations"
        )));
    }

    Ok(IvSolution {
        sigma: mid,
        vega: vega(spot, strike, rate, div, mid, time),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black_scholes;

    const S: f64 = 100.0;
    const R: f64 = 0.02;
    const Q: f64 = 0.0;
    const T: f64 = 0.5;

    #[test]
    fn test_round_trip_call() {
        for vol in [0.05, 0.15, 0.25, 0.60, 1.50, 4.0] {
            let market = black_scholes::price(S, 100.0, R, Q, vol, T, OptionKind::Call);
            let solved =
                implied_volatility(market, S, 100.0, R, Q, T, OptionKind::Call).unwrap();
            assert!(
                (solved.sigma - vol).abs() < VOL_TOLERANCE,
                "vol {vol} recovered as {}",
                solved.sigma
            );
        }
    }

    #[test]
    fn test_round_trip_put_otm() {
        let market = black_scholes::price(S, 90.0, R, Q, 0.30, 0.25, OptionKind::Put);
        let solved = implied_volatility(market, S, 90.0, R, Q, 0.25, OptionKind::Put).unwrap();
        assert!((solved.sigma - 0.30).abs() < VOL_TOLERANCE);
    }

    #[test]
    fn test_vega_comes_back_with_sigma() {
        let market = black_scholes::price(S, 100.0, R, Q, 0.25, T, OptionKind::Call);
        let solved = implied_volatility(market, S, 100.0, R, Q, T, OptionKind::Call).unwrap();
        let expected = black_scholes::vega(S, 100.0, R, Q, solved.sigma, T);
        assert_eq!(solved.vega, expected);
        assert!(solved.vega > 0.0);
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = implied_volatility(0.0, S, 100.0, R, Q, T, OptionKind::Call).unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_degenerate_time() {
        let err = implied_volatility(5.0, S, 100.0, R, Q, 0.0, OptionKind::Call).unwrap_err();
        assert!(matches!(err, ChainError::DegenerateExpiry(_)));
    }

    #[test]
    fn test_rejects_price_above_upper_bound() {
        // A call can never be worth more than the (dividend-discounted) spot
        let err = implied_volatility(150.0, S, 100.0, R, Q, T, OptionKind::Call).unwrap_err();
        assert!(matches!(err, ChainError::NoConvergence(_)));
    }

    #[test]
    fn test_rejects_price_below_intrinsic() {
        // Deep ITM call quoted below its zero-volatility value
        let floor = black_scholes::price(S, 50.0, R, Q, 0.0, T, OptionKind::Call);
        let err =
            implied_volatility(floor - 1.0, S, 50.0, R, Q, T, OptionKind::Call).unwrap_err();
        assert!(matches!(err, ChainError::NoConvergence(_)));
    }
}
