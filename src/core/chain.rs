//! Option chain ingestion
//!
//! Builds one [`OptionRecord`] per raw quote row and partitions the results
//! into label-keyed maps (`"<expiration> C"` / `"<expiration> P"`) under
//! `call_options` / `put_options` — the in-memory shape handed to the
//! visualization layer.
//!
//! A row whose record construction fails is logged and skipped; one bad quote
//! never aborts the rest of the chain.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::option::OptionKind;
use super::quote::{PriceMode, QuoteContext, RawQuote};
use super::record::OptionRecord;

/// Map key for one expiration and kind, e.g. `"2024-09-20 C"`.
pub fn chain_label(expiration: NaiveDate, kind: OptionKind) -> String {
    format!("{} {}", expiration.format("%Y-%m-%d"), kind.label())
}

/// Every finalized record for an underlying, keyed by expiration and kind.
///
/// ISO-formatted labels keep the `BTreeMap` iteration ordered by expiration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSet {
    pub underlying: String,
    pub spot: f64,
    pub quote_date: NaiveDate,
    pub quote_time: NaiveTime,
    pub rate: f64,
    pub price_mode: PriceMode,
    pub call_options: BTreeMap<String, Vec<OptionRecord>>,
    pub put_options: BTreeMap<String, Vec<OptionRecord>>,
}

impl ChainSet {
    pub fn new(underlying: impl Into<String>, ctx: &QuoteContext, price_mode: PriceMode) -> Self {
        Self {
            underlying: underlying.into(),
            spot: ctx.spot,
            quote_date: ctx.quote_date,
            quote_time: ctx.quote_time,
            rate: ctx.rate,
            price_mode,
            call_options: BTreeMap::new(),
            put_options: BTreeMap::new(),
        }
    }

    fn context(&self) -> QuoteContext {
        QuoteContext::new(self.spot, self.quote_date, self.quote_time, self.rate)
    }

    /// Ingest one expiration's call and put rows.
    ///
    /// Records are built row by row; failures are logged at warn level and
    /// skipped per the chain-level propagation policy.
    pub fn ingest_expiration(&mut self, expiration: NaiveDate, calls: &[RawQuote], puts: &[RawQuote]) {
        let ctx = self.context();

        let call_records = build_records(OptionKind::Call, calls, expiration, &ctx, self.price_mode);
        let put_records = build_records(OptionKind::Put, puts, expiration, &ctx, self.price_mode);

        self.call_options
            .insert(chain_label(expiration, OptionKind::Call), call_records);
        self.put_options
            .insert(chain_label(expiration, OptionKind::Put), put_records);
    }

    /// All expirations present, in ascending order.
    pub fn expirations(&self) -> Vec<NaiveDate> {
        self.call_options
            .keys()
            .filter_map(|label| {
                label
                    .split_whitespace()
                    .next()
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            })
            .collect()
    }

    /// Records for one expiration and kind.
    pub fn records(&self, expiration: NaiveDate, kind: OptionKind) -> Option<&Vec<OptionRecord>> {
        let label = chain_label(expiration, kind);
        match kind {
            OptionKind::Call => self.call_options.get(&label),
            OptionKind::Put => self.put_options.get(&label),
        }
    }

    /// Total finalized records across both partitions.
    pub fn total_records(&self) -> usize {
        self.call_options
            .values()
            .chain(self.put_options.values())
            .map(Vec::len)
            .sum()
    }
}

fn build_records(
    kind: OptionKind,
    rows: &[RawQuote],
    expiration: NaiveDate,
    ctx: &QuoteContext,
    price_mode: PriceMode,
) -> Vec<OptionRecord> {
    let mut records: Vec<OptionRecord> = rows
        .iter()
        .filter_map(|row| {
            match OptionRecord::build(kind, row, expiration, ctx, price_mode) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping {} {} strike {}: {}",
                        expiration,
                        kind,
                        row.strike,
                        e
                    );
                    None
                }
            }
        })
        .collect();

    records.sort_by(|a, b| a.strike.partial_cmp(&b.strike).unwrap());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black_scholes as bs;
    use crate::core::time::time_to_expiration;

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

    fn model_row(strike: f64, vol: f64, kind: OptionKind) -> RawQuote {
        let c = ctx();
        let tte = time_to_expiration(c.quote_date, c.quote_time, expiry());
        let model = bs::price(c.spot, strike, c.rate, bs::DIVIDEND_YIELD, vol, tte, kind);
        RawQuote::new(strike, model - 0.05, model + 0.05, model)
    }

    #[test]
    fn test_labels_and_partition() {
        let mut set = ChainSet::new("SPY", &ctx(), PriceMode::Last);
        set.ingest_expiration(
            expiry(),
            &[model_row(95.0, 0.25, OptionKind::Call), model_row(105.0, 0.25, OptionKind::Call)],
            &[model_row(95.0, 0.25, OptionKind::Put)],
        );

        assert!(set.call_options.contains_key("2024-09-20 C"));
        assert!(set.put_options.contains_key("2024-09-20 P"));
        assert_eq!(set.call_options["2024-09-20 C"].len(), 2);
        assert_eq!(set.put_options["2024-09-20 P"].len(), 1);
        assert_eq!(set.total_records(), 3);
        assert_eq!(set.expirations(), vec![expiry()]);
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let mut set = ChainSet::new("SPY", &ctx(), PriceMode::Mid);
        set.ingest_expiration(
            expiry(),
            &[
                model_row(100.0, 0.25, OptionKind::Call),
                RawQuote::new(110.0, 0.0, 0.0, 0.0), // dead quote, unsolvable
            ],
            &[],
        );

        let calls = set.records(expiry(), OptionKind::Call).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].strike, 100.0);
    }

    #[test]
    fn test_records_sorted_by_strike() {
        let mut set = ChainSet::new("SPY", &ctx(), PriceMode::Last);
        set.ingest_expiration(
            expiry(),
            &[
                model_row(110.0, 0.25, OptionKind::Call),
                model_row(90.0, 0.22, OptionKind::Call),
                model_row(100.0, 0.24, OptionKind::Call),
            ],
            &[],
        );

        let strikes: Vec<f64> = set
            .records(expiry(), OptionKind::Call)
            .unwrap()
            .iter()
            .map(|r| r.strike)
            .collect();
        assert_eq!(strikes, vec![90.0, 100.0, 110.0]);
    }

    #[test]
    fn test_ordered_by_expiration() {
        let mut set = ChainSet::new("SPY", &ctx(), PriceMode::Last);
        let later = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();

        set.ingest_expiration(later, &[], &[]);
        set.ingest_expiration(expiry(), &[], &[]);

        assert_eq!(set.expirations(), vec![expiry(), later]);
    }
}
