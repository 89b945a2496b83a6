//! Quote-to-time normalization
//!
//! Converts a quote timestamp and an expiration date into the model's native
//! time unit: a fraction of a 365-day year. Expiration is anchored to a fixed
//! 17:30 cutoff on the expiration calendar date.

use chrono::{NaiveDate, NaiveTime};

/// Daily expiration cutoff: 17:30 local exchange time.
pub const EXPIRY_CUTOFF: (u32, u32) = (17, 30);

/// Seconds in a 365-day year, the annualization denominator.
pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Year fraction between the quote timestamp and 17:30 on the expiration date.
///
/// Pure function of its inputs; a non-positive result means the expiration is
/// not in the future and is rejected downstream at record construction.
pub fn time_to_expiration(quote_date: NaiveDate, quote_time: NaiveTime, expiration: NaiveDate) -> f64 {
    let (hours, minutes) = EXPIRY_CUTOFF;
    let expiry_dt = expiration
        .and_hms_opt(hours, minutes, 0)
        .expect("cutoff is a valid wall-clock time");
    let quote_dt = quote_date.and_time(quote_time);

    let seconds = (expiry_dt - quote_dt).num_seconds() as f64;
    seconds / SECONDS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_week_out() {
        // 2024-01-10 10:30 -> 2024-01-17 17:30 is 7 days + 7 hours
        let tte = time_to_expiration(date(2024, 1, 10), time(10, 30), date(2024, 1, 17));
        let expected = (7.0 * 86_400.0 + 7.0 * 3_600.0) / SECONDS_PER_YEAR;
        assert!((tte - expected).abs() < 1e-12);
    }

    #[test]
    fn test_same_day_before_cutoff() {
        let tte = time_to_expiration(date(2024, 3, 15), time(9, 30), date(2024, 3, 15));
        assert!(tte > 0.0);
        assert!((tte - 8.0 * 3_600.0 / SECONDS_PER_YEAR).abs() < 1e-12);
    }

    #[test]
    fn test_expired_is_non_positive() {
        let tte = time_to_expiration(date(2024, 3, 15), time(18, 0), date(2024, 3, 15));
        assert!(tte < 0.0);

        let at_cutoff = time_to_expiration(date(2024, 3, 15), time(17, 30), date(2024, 3, 15));
        assert_eq!(at_cutoff, 0.0);
    }

    #[test]
    fn test_year_out() {
        // A full 365 days quoted at the cutoff is exactly one model year
        let tte = time_to_expiration(date(2024, 1, 1), time(17, 30), date(2024, 12, 31));
        assert!((tte - 365.0 / 365.0).abs() < 0.01);
    }
}
