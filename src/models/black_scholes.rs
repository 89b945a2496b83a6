//! Black-Scholes-Merton Model
//!
//! Provides:
//! - European option pricing (full precision, plus a rounded reporting form)
//! - The complete analytic Greeks battery, first through third order
//!
//! Pricing is the baseline every other component builds on: the implied
//! volatility solver inverts `price`, and each finalized record evaluates the
//! battery at its solved volatility.
//!
//! Every Greek is a free pure function of the model inputs. Where a formula
//! algebraically reuses an already-computed sensitivity (vomma and ultima reuse
//! vega, speed and zomma reuse gamma, lambda reuses delta), the reused value is
//! an explicit parameter, so the caller controls evaluation order and no
//! rounded value ever feeds back into a computation.
//!
//! Preconditions for the battery: `time > 0` and `vol > 0`. Degenerate inputs
//! are rejected once, at record construction, before any Greek is evaluated;
//! only `price` carries the terminal-value branches.

use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

use crate::core::OptionKind;

/// Continuous dividend yield, fixed to zero process-wide.
pub const DIVIDEND_YIELD: f64 = 0.0;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate - div + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, div, vol, time) - vol * time.sqrt()
}

/// Present value of the strike: K·e^(-rT)
pub fn pv_strike(strike: f64, rate: f64, time: f64) -> f64 {
    strike * (-rate * time).exp()
}

/// Present value of the spot under the dividend yield: S·e^(-qT)
pub fn pv_spot(spot: f64, div: f64, time: f64) -> f64 {
    spot * (-div * time).exp()
}

/// Black-Scholes-Merton European option price, full precision.
///
/// Terminal and zero-volatility branches return the (discounted) intrinsic
/// value; everywhere else this is the standard put-call symmetric form.
pub fn price(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    kind: OptionKind,
) -> f64 {
    if time <= 0.0 {
        return kind.intrinsic(spot, strike);
    }

    if vol <= 0.0 {
        // Zero vol: discounted intrinsic on the forward
        let forward = spot * ((rate - div) * time).exp();
        let df = (-rate * time).exp();
        return df * kind.intrinsic(forward, strike);
    }

    let d1 = d1(spot, strike, rate, div, vol, time);
    let d2 = d2(spot, strike, rate, div, vol, time);
    let pv_s = pv_spot(spot, div, time);
    let pv_k = pv_strike(strike, rate, time);

    match kind {
        OptionKind::Call => pv_s * norm_cdf(d1) - pv_k * norm_cdf(d2),
        OptionKind::Put => pv_k * norm_cdf(-d2) - pv_s * norm_cdf(-d1),
    }
}

/// Price rounded to the 3-decimal reporting precision.
///
/// Only for the reporting boundary; solver iterations always evaluate the
/// full-precision `price`.
pub fn reported_price(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    kind: OptionKind,
) -> f64 {
    (price(spot, strike, rate, div, vol, time, kind) * 1_000.0).round() / 1_000.0
}

/// Vega: PV(K)·φ(d2)·√T / 100, per 1 vol-point. Same for call and put.
pub fn vega(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    let d2 = d2(spot, strike, rate, div, vol, time);
    pv_strike(strike, rate, time) * norm_pdf(d2) * time.sqrt() / 100.0
}

/// Delta: dV/dS
pub fn delta(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, kind: OptionKind) -> f64 {
    let d1 = d1(spot, strike, rate, div, vol, time);
    let div_factor = (-div * time).exp();
    match kind {
        OptionKind::Call => div_factor * norm_cdf(d1),
        OptionKind::Put => -div_factor * norm_cdf(-d1),
    }
}

/// Gamma: d²V/dS². Same for call and put.
pub fn gamma(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    let d1 = d1(spot, strike, rate, div, vol, time);
    (-div * time).exp() * norm_pdf(d1) / (spot * vol * time.sqrt())
}

/// Theta: dV/dt, per day
pub fn theta(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, kind: OptionKind) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    let pv_s = pv_spot(spot, div, time);
    let pv_k = pv_strike(strike, rate, time);
    let decay = -pv_s * norm_pdf(d1v) * vol / (2.0 * time.sqrt());

    let annual = match kind {
        OptionKind::Call => {
            decay - rate * pv_k * norm_cdf(d2v) + div * pv_s * norm_cdf(d1v)
        }
        OptionKind::Put => {
            decay + rate * pv_k * norm_cdf(-d2v) - div * pv_s * norm_cdf(-d1v)
        }
    };
    annual / 365.0
}

/// Rho: dV/dr, per 1% rate move
pub fn rho(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, kind: OptionKind) -> f64 {
    let d2v = d2(spot, strike, rate, div, vol, time);
    let pv_k = pv_strike(strike, rate, time);
    match kind {
        OptionKind::Call => pv_k * time * norm_cdf(d2v) / 100.0,
        OptionKind::Put => -pv_k * time * norm_cdf(-d2v) / 100.0,
    }
}

/// Lambda: elasticity, delta · S / price. Reuses the already-computed delta
/// and the observed option price.
pub fn lambda(delta: f64, spot: f64, price: f64) -> f64 {
    delta * spot / price
}

/// Vanna: d²V/dSdσ. Same for call and put.
pub fn vanna(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    -(-div * time).exp() * norm_pdf(d1v) * d2v / vol
}

/// Charm: delta decay, per day
pub fn charm(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, kind: OptionKind) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    let sqrt_t = time.sqrt();
    let div_factor = (-div * time).exp();
    let drift = (2.0 * (rate - div) * time - d2v * vol * sqrt_t) / (2.0 * time * vol * sqrt_t);

    let annual = match kind {
        OptionKind::Call => div * div_factor * norm_cdf(d1v) - div_factor * norm_pdf(d1v) * drift,
        OptionKind::Put => -div * div_factor * norm_cdf(-d1v) - div_factor * norm_pdf(d1v) * drift,
    };
    annual / 365.0
}

/// Vomma: d²V/dσ², reusing the already-computed vega.
pub fn vomma(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, vega: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    vega * d1v * d2v / vol
}

/// Veta: vega decay, per day per vol-point. Same for call and put.
pub fn veta(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    let sqrt_t = time.sqrt();

    -pv_spot(spot, div, time)
        * norm_pdf(d1v)
        * sqrt_t
        * (div + (rate - div) * d1v / (vol * sqrt_t) - (1.0 + d1v * d2v) / (2.0 * time))
        / (100.0 * 365.0)
}

/// Speed: d³V/dS³, reusing the already-computed gamma.
pub fn speed(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, gamma: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    -(gamma / spot) * (d1v / (vol * time.sqrt()) + 1.0)
}

/// Zomma: d³V/dS²dσ, reusing the already-computed gamma.
pub fn zomma(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, gamma: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    gamma * (d1v * d2v - 1.0) / vol
}

/// Color: gamma decay, per day. Same for call and put.
pub fn color(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    let sqrt_t = time.sqrt();
    let drift = (2.0 * (rate - div) * time - d2v * vol * sqrt_t) / (vol * sqrt_t);

    -(-div * time).exp() * norm_pdf(d1v) / (2.0 * spot * time * vol * sqrt_t)
        * (2.0 * div * time + 1.0 + drift * d1v)
        / 365.0
}

/// Ultima: d³V/dσ³, reusing the already-computed vega.
pub fn ultima(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64, vega: f64) -> f64 {
    let d1v = d1(spot, strike, rate, div, vol, time);
    let d2v = d2(spot, strike, rate, div, vol, time);
    let d1d2 = d1v * d2v;
    -vega / (vol * vol) * (d1d2 * (1.0 - d1d2) + d1v * d1v + d2v * d2v)
}

/// Evaluate the full Greeks battery at a solved volatility, in dependency
/// order: delta before lambda, gamma before speed and zomma, vega before
/// vomma, veta and ultima. All intermediates stay full precision.
pub fn greeks(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    observed_price: f64,
    kind: OptionKind,
) -> crate::core::Greeks {
    let delta_v = delta(spot, strike, rate, div, vol, time, kind);
    let gamma_v = gamma(spot, strike, rate, div, vol, time);
    let vega_v = vega(spot, strike, rate, div, vol, time);

    crate::core::Greeks {
        delta: delta_v,
        gamma: gamma_v,
        theta: theta(spot, strike, rate, div, vol, time, kind),
        rho: rho(spot, strike, rate, div, vol, time, kind),
        vega: vega_v,
        lambda: lambda(delta_v, spot, observed_price),
        vanna: vanna(spot, strike, rate, div, vol, time),
        charm: charm(spot, strike, rate, div, vol, time, kind),
        vomma: vomma(spot, strike, rate, div, vol, time, vega_v),
        veta: veta(spot, strike, rate, div, vol, time),
        speed: speed(spot, strike, rate, div, vol, time, gamma_v),
        zomma: zomma(spot, strike, rate, div, vol, time, gamma_v),
        color: color(spot, strike, rate, div, vol, time),
        ultima: ultima(spot, strike, rate, div, vol, time, vega_v),
    }
}
