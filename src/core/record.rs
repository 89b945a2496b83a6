//! Finalized option records
//!
//! An [`OptionRecord`] is the snapshot built once per quote row: construction
//! normalizes time, solves implied volatility, evaluates the full Greeks
//! battery, and freezes. A changed quote produces a new record, never an
//! in-place update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{ChainError, ChainResult};
use super::greeks::Greeks;
use super::option::OptionKind;
use super::quote::{PriceMode, QuoteContext, RawQuote};
use super::time::time_to_expiration;
use crate::models::black_scholes as bs;
use crate::models::implied_vol::implied_volatility;

/// Record field names readable by [`OptionRecord::field`], in reporting order.
/// The Greek names continue [`super::greeks::GREEK_FIELDS`].
pub const RECORD_FIELDS: &[&str] = &[
    "observed_price", "implied_volatility", "delta", "gamma", "theta", "rho", "vega", "lambda",
    "vanna", "charm", "vomma", "veta", "speed", "zomma", "color", "ultima",
];

/// A single option contract with solved implied volatility and Greeks.
///
/// All fields are frozen at construction; spot, strike and observed price are
/// rounded to 3 decimals for display stability, the Greeks to 4. The implied
/// volatility is stored unrounded and every Greek was computed from it at full
/// precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionRecord {
    pub kind: OptionKind,
    pub expiration: NaiveDate,
    pub spot: f64,
    pub strike: f64,
    pub observed_price: f64,
    pub bid: f64,
    pub ask: f64,
    /// In the money at construction time; never recomputed
    pub itm: bool,
    /// Time to expiration in year fractions
    pub time_to_expiration: f64,
    /// Annualized implied volatility, solved from the observed price
    pub implied_volatility: f64,
    #[serde(flatten)]
    pub greeks: Greeks,
}

fn round3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}

impl OptionRecord {
    /// Build a record from one raw quote row and the chain-level snapshot.
    ///
    /// Fails as a whole on malformed numerics, a non-positive time to
    /// expiration, or an unsolvable implied volatility; no partial record is
    /// ever produced.
    pub fn build(
        kind: OptionKind,
        quote: &RawQuote,
        expiration: NaiveDate,
        ctx: &QuoteContext,
        price_mode: PriceMode,
    ) -> ChainResult<Self> {
        let observed_raw = price_mode.observed_price(quote);

        if !ctx.spot.is_finite()
            || !quote.strike.is_finite()
            || !observed_raw.is_finite()
            || !ctx.rate.is_finite()
        {
            return Err(ChainError::invalid_input("Non-finite quote field"));
        }
        if ctx.spot <= 0.0 || quote.strike <= 0.0 {
            return Err(ChainError::invalid_input("Non-positive spot or strike"));
        }

        // Moneyness from the raw inputs, fixed for the record's lifetime
        let itm = kind.is_itm(ctx.spot, quote.strike);

        let spot = round3(ctx.spot);
        let strike = round3(quote.strike);
        let observed = round3(observed_raw);

        let tte = time_to_expiration(ctx.quote_date, ctx.quote_time, expiration);
        if tte <= 0.0 {
            return Err(ChainError::degenerate_expiry(format!(
                "{expiration} is not after the quote timestamp"
            )));
        }

        let solved = implied_volatility(
            observed,
            spot,
            strike,
            ctx.rate,
            bs::DIVIDEND_YIELD,
            tte,
            kind,
        )?;
        let sigma = solved.sigma;
        let (rate, div) = (ctx.rate, bs::DIVIDEND_YIELD);

        // Battery in dependency order; the solver's vega is reused, and only
        // full-precision values feed later formulas.
        let delta = bs::delta(spot, strike, rate, div, sigma, tte, kind);
        let gamma = bs::gamma(spot, strike, rate, div, sigma, tte);
        let vega = solved.vega;

        let greeks = Greeks {
            delta,
            gamma,
            theta: bs::theta(spot, strike, rate, div, sigma, tte, kind),
            rho: bs::rho(spot, strike, rate, div, sigma, tte, kind),
            vega,
            lambda: bs::lambda(delta, spot, observed),
            vanna: bs::vanna(spot, strike, rate, div, sigma, tte),
            charm: bs::charm(spot, strike, rate, div, sigma, tte, kind),
            vomma: bs::vomma(spot, strike, rate, div, sigma, tte, vega),
            veta: bs::veta(spot, strike, rate, div, sigma, tte),
            speed: bs::speed(spot, strike, rate, div, sigma, tte, gamma),
            zomma: bs::zomma(spot, strike, rate, div, sigma, tte, gamma),
            color: bs::color(spot, strike, rate, div, sigma, tte),
            ultima: bs::ultima(spot, strike, rate, div, sigma, tte, vega),
        }
        .rounded();

        Ok(Self {
            kind,
            expiration,
            spot,
            strike,
            observed_price: observed,
            bid: quote.bid,
            ask: quote.ask,
            itm,
            time_to_expiration: tte,
            implied_volatility: sigma,
            greeks,
        })
    }

    /// Read a numeric field by its stable name, for the visualization layer.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "observed_price" => Some(self.observed_price),
            "implied_volatility" => Some(self.implied_volatility),
            "spot" => Some(self.spot),
            "strike" => Some(self.strike),
            "bid" => Some(self.bid),
            "ask" => Some(self.ask),
            "time_to_expiration" => Some(self.time_to_expiration),
            other => self.greeks.by_name(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn ctx() -> QuoteContext {
        QuoteContext::new(
            100.0,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            0.02,
        )
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 20).unwrap()
    }

    /// A quote whose last price is the exact model price at the given vol.
    fn synthetic_quote(strike: f64, vol: f64, kind: OptionKind) -> RawQuote {
        let c = ctx();
        let tte = time_to_expiration(c.quote_date, c.quote_time, expiry());
        let model = bs::price(c.spot, strike, c.rate, bs::DIVIDEND_YIELD, vol, tte, kind);
        RawQuote::new(strike, model - 0.05, model + 0.05, model)
    }

    #[test]
    fn test_build_recovers_volatility() {
        let quote = synthetic_quote(100.0, 0.25, OptionKind::Call);
        let record = OptionRecord::build(
            OptionKind::Call,
            &quote,
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();

        assert!((record.implied_volatility - 0.25).abs() < 0.002);
        assert!(record.time_to_expiration > 0.5 && record.time_to_expiration < 0.53);
        assert!(record.greeks.delta > 0.0 && record.greeks.delta <= 1.0);
        assert!(record.greeks.vega > 0.0);
        assert!(record.greeks.theta < 0.0);
    }

    #[test]
    fn test_moneyness_fixed_at_construction() {
        let call = OptionRecord::build(
            OptionKind::Call,
            &synthetic_quote(95.0, 0.25, OptionKind::Call),
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();
        assert!(call.itm);

        let put = OptionRecord::build(
            OptionKind::Put,
            &synthetic_quote(95.0, 0.25, OptionKind::Put),
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();
        assert!(!put.itm);
    }

    #[test]
    fn test_mid_mode_uses_bid_ask_average() {
        let quote = synthetic_quote(100.0, 0.25, OptionKind::Call);
        let record = OptionRecord::build(
            OptionKind::Call,
            &quote,
            expiry(),
            &ctx(),
            PriceMode::Mid,
        )
        .unwrap();

        let mid = round3((quote.bid + quote.ask) / 2.0);
        assert_eq!(record.observed_price, mid);
    }

    #[test]
    fn test_greeks_reported_at_four_decimals() {
        let record = OptionRecord::build(
            OptionKind::Call,
            &synthetic_quote(100.0, 0.25, OptionKind::Call),
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();

        for name in ["delta", "gamma", "theta", "vanna", "speed"] {
            let v = record.field(name).unwrap();
            let scaled = v * 10_000.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "{name} not rounded: {v}"
            );
        }
        // Implied volatility stays unrounded
        assert!(record.field("implied_volatility").is_some());
    }

    #[test]
    fn test_degenerate_expiry_fails_whole_record() {
        let c = ctx();
        // Quoted after the 17:30 cutoff on the expiration date itself
        let err = OptionRecord::build(
            OptionKind::Call,
            &synthetic_quote(100.0, 0.25, OptionKind::Call),
            c.quote_date,
            &QuoteContext::new(c.spot, c.quote_date, NaiveTime::from_hms_opt(18, 0, 0).unwrap(), c.rate),
            PriceMode::Last,
        )
        .unwrap_err();
        assert!(matches!(err, ChainError::DegenerateExpiry(_)));
    }

    #[test]
    fn test_empty_quote_row_is_invalid() {
        // bid/ask/last all zero after missing-field fill
        let quote = RawQuote::new(100.0, 0.0, 0.0, 0.0);
        let err =
            OptionRecord::build(OptionKind::Call, &quote, expiry(), &ctx(), PriceMode::Mid)
                .unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));
    }

    #[test]
    fn test_gamma_symmetry_across_kinds() {
        let call = OptionRecord::build(
            OptionKind::Call,
            &synthetic_quote(105.0, 0.25, OptionKind::Call),
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();
        let put = OptionRecord::build(
            OptionKind::Put,
            &synthetic_quote(105.0, 0.25, OptionKind::Put),
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();

        // Both solve essentially the same vol, so the kind-free Greeks agree
        assert!((call.greeks.gamma - put.greeks.gamma).abs() < 1e-3);
        assert!((call.implied_volatility - put.implied_volatility).abs() < 0.002);
    }

    #[test]
    fn test_field_names_all_resolve() {
        let record = OptionRecord::build(
            OptionKind::Put,
            &synthetic_quote(100.0, 0.30, OptionKind::Put),
            expiry(),
            &ctx(),
            PriceMode::Last,
        )
        .unwrap();

        for name in RECORD_FIELDS {
            assert!(record.field(name).is_some(), "missing field {name}");
        }
        assert!(record.field("unknown").is_none());
    }
}
