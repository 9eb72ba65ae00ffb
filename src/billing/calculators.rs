//! Core billing calculation functions.
//!
//! Pure functions for money rounding and billing period math - no database
//! access.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{AppError, Result};

/// Round to 2 decimal places using round-half-away-from-zero at the cent
/// level.
///
/// Applied once when a monetary value is computed; stored amounts are never
/// re-rounded.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use velopark_web::billing::round2;
///
/// assert_eq!(round2(dec!(100.005)), dec!(100.01));
/// assert_eq!(round2(dec!(16.6665)), dec!(16.67));
/// assert_eq!(round2(dec!(-2.675)), dec!(-2.68));
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One natural weekly billing block of a rental: `[start, end)`, always
/// exactly 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBlock {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Walk a rental's billable span in 7-day blocks anchored at `rental_start`
/// and keep the blocks overlapping the caller's `[from, to)` window.
///
/// The window only filters which of the rental's natural blocks are returned;
/// it never shortens a block. A block overlaps the window iff
/// `block.end > from && block.start < to` (half-open interval test).
pub fn weekly_blocks(
    rental_start: NaiveDate,
    rental_stop: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<WeekBlock> {
    let mut blocks = Vec::new();
    let mut block_start = rental_start;

    while block_start < to && block_start < rental_stop {
        let block_end = block_start + Days::new(7);
        if block_end > from && block_start < to {
            blocks.push(WeekBlock {
                start: block_start,
                end: block_end,
            });
        }
        block_start = block_end;
    }

    blocks
}

/// Resolve an optional strict `YYYY-MM` month into the half-open UTC window
/// `[first_of_month, first_of_next_month)`.
///
/// An omitted month means the current UTC calendar month of `now`.
pub fn month_window(month: Option<&str>, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let (year, month) = match month {
        Some(s) => parse_month(s)?,
        None => (now.year(), now.month()),
    };

    let start = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InvalidMonth(format!("{year:04}-{month:02}")))?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InvalidMonth(format!("{next_year:04}-{next_month:02}")))?;

    Ok((start, end))
}

/// Strict `YYYY-MM` parser: four digits, dash, month 01-12. Nothing else.
fn parse_month(s: &str) -> Result<(i32, u32)> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(AppError::InvalidMonth(s.to_string()));
    }

    let year: i32 = s[..4]
        .parse()
        .map_err(|_| AppError::InvalidMonth(s.to_string()))?;
    let month: u32 = s[5..]
        .parse()
        .map_err(|_| AppError::InvalidMonth(s.to_string()))?;
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidMonth(s.to_string()));
    }

    Ok((year, month))
}

/// Total of already-rounded stored amounts, rounded once more for the ledger.
pub fn total_debt<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round2(amounts.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== round2 tests ====================

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec!(100.005)), dec!(100.01));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(2.665)), dec!(2.67));
        assert_eq!(round2(dec!(-100.005)), dec!(-100.01));
        assert_eq!(round2(dec!(-2.675)), dec!(-2.68));
    }

    #[test]
    fn test_round2_non_midpoint() {
        assert_eq!(round2(dec!(1.234)), dec!(1.23));
        assert_eq!(round2(dec!(1.236)), dec!(1.24));
        assert_eq!(round2(dec!(16.6665)), dec!(16.67));
        assert_eq!(round2(dec!(1000)), dec!(1000));
    }

    #[test]
    fn test_round2_zero() {
        assert_eq!(round2(dec!(0)), dec!(0));
        assert_eq!(round2(dec!(0.004)), dec!(0.00));
    }

    // ==================== weekly_blocks tests ====================

    #[test]
    fn test_weekly_blocks_window_overlap() {
        // Rental 2024-01-01 .. 2024-02-01, window [2024-01-10, 2024-01-20).
        // Block 01-01..01-08 ends exactly at no overlap with from=01-10;
        // blocks starting 01-08 and 01-15 overlap; block 01-22 starts past to.
        let blocks = weekly_blocks(
            date(2024, 1, 1),
            date(2024, 2, 1),
            date(2024, 1, 10),
            date(2024, 1, 20),
        );

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start, date(2024, 1, 8));
        assert_eq!(blocks[0].end, date(2024, 1, 15));
        assert_eq!(blocks[1].start, date(2024, 1, 15));
        assert_eq!(blocks[1].end, date(2024, 1, 22));
    }

    #[test]
    fn test_weekly_blocks_never_shortened_by_window() {
        // A window smaller than a week still yields the full natural block.
        let blocks = weekly_blocks(
            date(2024, 1, 1),
            date(2024, 2, 1),
            date(2024, 1, 2),
            date(2024, 1, 3),
        );

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, date(2024, 1, 1));
        assert_eq!(blocks[0].end, date(2024, 1, 8));
    }

    #[test]
    fn test_weekly_blocks_stop_at_rental_end() {
        // Rental stops 2024-01-10: the block starting 01-08 is still begun
        // (block start precedes the stop), the one starting 01-15 is not.
        let blocks = weekly_blocks(
            date(2024, 1, 1),
            date(2024, 1, 10),
            date(2024, 1, 1),
            date(2024, 3, 1),
        );

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].start, date(2024, 1, 8));
        assert_eq!(blocks[1].end, date(2024, 1, 15));
    }

    #[test]
    fn test_weekly_blocks_rental_entirely_outside_window() {
        let blocks = weekly_blocks(
            date(2024, 3, 1),
            date(2024, 4, 1),
            date(2024, 1, 1),
            date(2024, 2, 1),
        );
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_weekly_blocks_exact_boundary_excluded() {
        // Block [01-01, 01-08) with from = 01-08: block_end > from fails.
        let blocks = weekly_blocks(
            date(2024, 1, 1),
            date(2024, 1, 8),
            date(2024, 1, 8),
            date(2024, 2, 1),
        );
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_weekly_blocks_are_seven_days() {
        let blocks = weekly_blocks(
            date(2024, 1, 3),
            date(2024, 6, 1),
            date(2024, 1, 1),
            date(2024, 3, 1),
        );
        for block in &blocks {
            assert_eq!(block.end - block.start, chrono::Duration::days(7));
        }
        // Blocks tile the span without gaps.
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    // ==================== month_window tests ====================

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_month_window_explicit() {
        let (start, end) = month_window(Some("2024-02"), utc(2030, 6, 15)).unwrap();
        assert_eq!(start, utc(2024, 2, 1));
        assert_eq!(end, utc(2024, 3, 1));
    }

    #[test]
    fn test_month_window_december_rolls_over() {
        let (start, end) = month_window(Some("2024-12"), utc(2030, 6, 15)).unwrap();
        assert_eq!(start, utc(2024, 12, 1));
        assert_eq!(end, utc(2025, 1, 1));
    }

    #[test]
    fn test_month_window_defaults_to_current_month() {
        let now = Utc.with_ymd_and_hms(2024, 7, 19, 13, 45, 2).unwrap();
        let (start, end) = month_window(None, now).unwrap();
        assert_eq!(start, utc(2024, 7, 1));
        assert_eq!(end, utc(2024, 8, 1));
    }

    #[test]
    fn test_month_window_rejects_malformed() {
        let now = utc(2024, 1, 1);
        for bad in ["2024-13", "2024-00", "2024-1", "24-01", "2024/01", "2024-011", "garbage", ""] {
            assert!(
                matches!(month_window(Some(bad), now), Err(AppError::InvalidMonth(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    // ==================== total_debt tests ====================

    #[test]
    fn test_total_debt_sums_stored_amounts() {
        // Stored amounts were rounded at creation; 100.005 became 100.01.
        let total = total_debt([dec!(100.01), dec!(200), dec!(50)]);
        assert_eq!(total, dec!(350.01));
    }

    #[test]
    fn test_total_debt_empty() {
        assert_eq!(total_debt(Vec::new()), dec!(0));
    }
}
