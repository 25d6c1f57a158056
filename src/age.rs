//! age.rs
//!
//! Calendar-aware age computation: elapsed (years, months, days) since a birth
//! date, the raw day count, and the next anniversary of that date.
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python’s
//! relativedelta), so we build one on top of `checked_add_months`, whose
//! clamping matches the calendar rules we need:
//!   • adding months to Jan 31 lands on Feb 28/29, not an invalid date
//!   • leap years
//!   • varying month lengths
//!
//! Everything here is pure: the reference instant ("now") is always a
//! parameter, never read from the system clock.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Errors for birth-date construction and age computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    /// No such calendar date, or the year is out of the supported range.
    #[error("invalid birth date {year:04}-{month:02}-{day:02}: {reason}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        reason: &'static str,
    },

    /// Birth date after the reference date.
    #[error("birth date {birth} is after the reference date {reference}")]
    InvalidRange {
        birth: NaiveDate,
        reference: NaiveDate,
    },
}

/// A validated birth date. Construction is the only way to obtain one, so any
/// `BirthDate` reaching [`compute`] is a real calendar date of 1900 or later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub const MIN_YEAR: i32 = 1900;

    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, AgeError> {
        let invalid = |reason| AgeError::InvalidDate {
            year,
            month,
            day,
            reason,
        };

        if year < Self::MIN_YEAR {
            return Err(invalid("year before 1900"));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid("month must be 1-12"));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(invalid("day out of range for that month"));
        }

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such date"))?;
        Ok(Self(date))
    }

    pub fn from_date(date: NaiveDate) -> Result<Self, AgeError> {
        Self::new(date.year(), date.month(), date.day())
    }

    pub fn as_date(self) -> NaiveDate {
        self.0
    }
}

/// Elapsed time since a birth date, plus the next anniversary of it.
///
/// The decomposition invariant: advancing the birth date by `years`, then
/// `months`, then `days` calendar units lands exactly on the reference date;
/// advancing one more day would pass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// Whole days between birth date and reference date.
    pub total_days: i64,
    /// Whole seconds from the reference instant to the next anniversary's
    /// midnight, clamped at zero on the anniversary itself.
    pub seconds_remaining: i64,
    pub next_anniversary: NaiveDate,
    /// True when the reference date is the anniversary. The renderer keys the
    /// birthday banner off this flag, never off a zero second count.
    pub is_anniversary_today: bool,
}

impl AgeBreakdown {
    // Display conversions derived from the raw day count. No calendar
    // awareness involved.

    pub fn weeks(&self) -> i64 {
        self.total_days / 7
    }

    pub fn remaining_days(&self) -> i64 {
        self.total_days % 7
    }

    pub fn hours(&self) -> i64 {
        self.total_days * 24
    }

    pub fn minutes(&self) -> i64 {
        self.total_days * 1440
    }

    pub fn seconds(&self) -> i64 {
        self.total_days * 86_400
    }
}

/// Computes the full age breakdown for `birth` as of `now`.
///
/// Fails with [`AgeError::InvalidRange`] when the birth date is in the future
/// relative to `now`; no clamping, no partial result.
pub fn compute(birth: BirthDate, now: NaiveDateTime) -> Result<AgeBreakdown, AgeError> {
    let birth_date = birth.as_date();
    let today = now.date();

    if birth_date > today {
        return Err(AgeError::InvalidRange {
            birth: birth_date,
            reference: today,
        });
    }

    // Largest whole-month advance from the birth date that does not pass
    // today. The raw month difference overshoots by at most one month, when
    // the (possibly clamped) day-of-month lands past today's.
    let mut total_months =
        (today.year() - birth_date.year()) * 12 + today.month() as i32 - birth_date.month() as i32;
    let mut anchor = add_months_clamped(birth_date, total_months);
    if anchor > today {
        total_months -= 1;
        anchor = add_months_clamped(birth_date, total_months);
    }

    let years = (total_months / 12) as u32;
    let months = (total_months % 12) as u32;
    let days = (today - anchor).num_days() as u32;

    let total_days = (today - birth_date).num_days();

    let next_anniversary = next_anniversary(birth_date, today);
    let midnight = next_anniversary.and_time(NaiveTime::MIN);
    let seconds_remaining = (midnight - now).num_seconds().max(0);

    Ok(AgeBreakdown {
        years,
        months,
        days,
        total_days,
        seconds_remaining,
        next_anniversary,
        is_anniversary_today: next_anniversary == today,
    })
}

/// Earliest date on or after `today` carrying the birth month and day.
///
/// A Feb 29 birth date is observed on Mar 1 in non-leap years.
fn next_anniversary(birth: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = anniversary_in(today.year(), birth);
    if this_year >= today {
        this_year
    } else {
        anniversary_in(today.year() + 1, birth)
    }
}

fn anniversary_in(year: i32, birth: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        // Only Feb 29 can fail here, given a validated birth date.
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .expect("month/day validated at construction")
}

fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    // `months` is non-negative at both call sites; overflow only at the far
    // end of chrono's representable range.
    date.checked_add_months(Months::new(months as u32))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns number of days in a given year/month (handles leap years).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth(y: i32, m: u32, d: u32) -> BirthDate {
        BirthDate::new(y, m, d).unwrap()
    }

    fn at_noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(
            BirthDate::new(2001, 2, 29),
            Err(AgeError::InvalidDate { .. })
        ));
        assert!(matches!(
            BirthDate::new(2000, 13, 1),
            Err(AgeError::InvalidDate { .. })
        ));
        assert!(matches!(
            BirthDate::new(2000, 4, 31),
            Err(AgeError::InvalidDate { .. })
        ));
        assert!(matches!(
            BirthDate::new(1899, 12, 31),
            Err(AgeError::InvalidDate { .. })
        ));
        assert!(BirthDate::new(2000, 2, 29).is_ok());
    }

    #[test]
    fn rejects_birth_after_reference() {
        let err = compute(birth(2024, 6, 16), at_noon(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, AgeError::InvalidRange { .. }));
    }

    #[test]
    fn millennium_baby_mid_2024() {
        let b = compute(birth(2000, 1, 1), at_noon(2024, 6, 15)).unwrap();
        assert_eq!((b.years, b.months, b.days), (24, 5, 14));
        assert_eq!(b.total_days, 8932);
        assert_eq!(
            b.next_anniversary,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert!(!b.is_anniversary_today);

        let expected =
            (b.next_anniversary.and_time(NaiveTime::MIN) - at_noon(2024, 6, 15)).num_seconds();
        assert_eq!(b.seconds_remaining, expected);
    }

    #[test]
    fn anniversary_on_the_day_itself() {
        let b = compute(birth(2000, 3, 1), at_noon(2024, 3, 1)).unwrap();
        assert!(b.is_anniversary_today);
        assert_eq!(
            b.next_anniversary,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!((b.years, b.months, b.days), (24, 0, 0));
        assert_eq!(b.seconds_remaining, 0);
    }

    #[test]
    fn born_today() {
        let b = compute(birth(2024, 6, 15), at_noon(2024, 6, 15)).unwrap();
        assert_eq!((b.years, b.months, b.days), (0, 0, 0));
        assert_eq!(b.total_days, 0);
        assert!(b.is_anniversary_today);
    }

    #[test]
    fn leap_day_birth_observed_march_first() {
        let b = compute(birth(2000, 2, 29), at_noon(2023, 3, 1)).unwrap();
        assert_eq!(
            b.next_anniversary,
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()
        );
        assert!(b.is_anniversary_today);

        // One day later the anniversary rolls to the real Feb 29 of 2024.
        let b = compute(birth(2000, 2, 29), at_noon(2023, 3, 2)).unwrap();
        assert_eq!(
            b.next_anniversary,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn end_of_month_birth_clamps_when_decomposing() {
        // Jan 31 + 24y1m clamps to Feb 29 2024; one more day reaches Mar 1.
        let b = compute(birth(2000, 1, 31), at_noon(2024, 3, 1)).unwrap();
        assert_eq!((b.years, b.months, b.days), (24, 1, 1));
    }

    #[test]
    fn day_before_and_day_after_the_anniversary() {
        let b = compute(birth(1992, 6, 14), at_noon(2024, 6, 13)).unwrap();
        assert_eq!((b.years, b.months, b.days), (31, 11, 30));
        assert_eq!(
            b.next_anniversary,
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
        );

        let b = compute(birth(1992, 6, 14), at_noon(2024, 6, 15)).unwrap();
        assert_eq!((b.years, b.months, b.days), (32, 0, 1));
        assert_eq!(
            b.next_anniversary,
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
        );
    }

    #[test]
    fn compute_is_pure() {
        let first = compute(birth(1985, 11, 30), at_noon(2024, 6, 15)).unwrap();
        let second = compute(birth(1985, 11, 30), at_noon(2024, 6, 15)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28); // century, not leap
        assert_eq!(days_in_month(2000, 2), 29); // divisible by 400
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
