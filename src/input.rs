//! Interactive birth-date collection.
//!
//! Mirrors a three-field date form: year first, then month, then a day whose
//! accepted range depends on the chosen year and month (leap-aware). Each
//! prompt re-asks until it gets a value in range, so only real calendar dates
//! ever reach the core.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::age::{BirthDate, days_in_month};

/// Prompts on stdin/stdout for a birth date no later than `max_year`.
pub fn prompt_birth_date(max_year: i32) -> Result<BirthDate> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    collect_birth_date(&mut lines, max_year)
}

/// The prompt loop itself, generic over the line source so tests can script it.
fn collect_birth_date<I>(lines: &mut I, max_year: i32) -> Result<BirthDate>
where
    I: Iterator<Item = io::Result<String>>,
{
    let year = prompt_number(lines, "Year", BirthDate::MIN_YEAR as i64, max_year as i64)? as i32;
    let month = prompt_number(lines, "Month", 1, 12)? as u32;
    let last_day = days_in_month(year, month) as i64;
    let day = prompt_number(lines, "Day", 1, last_day)? as u32;

    BirthDate::new(year, month, day).context("constructing birth date from prompt answers")
}

fn prompt_number<I>(lines: &mut I, label: &str, lo: i64, hi: i64) -> Result<i64>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("{label} [{lo}-{hi}]: ");
        io::stdout().flush().context("flushing prompt")?;

        let line = lines
            .next()
            .with_context(|| format!("stdin closed before a {label} was entered"))?
            .context("reading stdin")?;

        match line.trim().parse::<i64>() {
            Ok(n) if (lo..=hi).contains(&n) => return Ok(n),
            _ => eprintln!("  enter a number between {lo} and {hi}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn script(answers: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        answers
            .iter()
            .map(|s| Ok(s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn accepts_a_scripted_date() {
        let mut lines = script(&["1992", "6", "14"]);
        let birth = collect_birth_date(&mut lines, 2024).unwrap();
        assert_eq!(birth.as_date(), NaiveDate::from_ymd_opt(1992, 6, 14).unwrap());
    }

    #[test]
    fn reprompts_until_in_range() {
        // Garbage, too-early and too-late years before a valid one.
        let mut lines = script(&["abc", "1850", "2050", "2000", "2", "29"]);
        let birth = collect_birth_date(&mut lines, 2024).unwrap();
        assert_eq!(birth.as_date(), NaiveDate::from_ymd_opt(2000, 2, 29).unwrap());
    }

    #[test]
    fn day_range_follows_year_and_month() {
        // Feb 30 is out of range for the day prompt itself; 29 is valid in 2024.
        let mut lines = script(&["2024", "2", "30", "29"]);
        let birth = collect_birth_date(&mut lines, 2024).unwrap();
        assert_eq!(birth.as_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        // ...but in 2023 the range stops at 28, so 29 gets re-asked.
        let mut lines = script(&["2023", "2", "29", "28"]);
        let birth = collect_birth_date(&mut lines, 2024).unwrap();
        assert_eq!(birth.as_date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut lines = script(&["1992", "6"]);
        assert!(collect_birth_date(&mut lines, 2024).is_err());
    }
}
