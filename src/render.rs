//! Terminal rendering of an [`AgeBreakdown`].
//!
//! The core hands this module one finished record; everything after that,
//! including the once-per-second countdown tick, is a display concern that
//! never consults the core again.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::age::AgeBreakdown;

const PANEL_MIN_WIDTH: usize = 36;

pub const BIRTHDAY_BANNER: &str = "\u{1f389} Happy Birthday! \u{1f389}";

// Utilities for aligned key/value rows

fn stat_row(key: &str, value: &str, align_width: usize) -> String {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    format!("{key_part}{dots}{value}")
}

fn header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

fn group_thousands(n: i64) -> String {
    // Only fed non-negative counts.
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The six-line age panel: calendar decomposition first, then the raw day
/// count restated as weeks, hours, minutes and seconds.
pub fn breakdown_panel(breakdown: &AgeBreakdown) -> String {
    let rows = [
        (
            "Age",
            format!(
                "{} years, {} months, {} days",
                breakdown.years, breakdown.months, breakdown.days
            ),
        ),
        (
            "Weeks",
            format!(
                "{} weeks, {} days",
                group_thousands(breakdown.weeks()),
                breakdown.remaining_days()
            ),
        ),
        ("Total days", group_thousands(breakdown.total_days)),
        ("Hours", group_thousands(breakdown.hours())),
        ("Minutes", group_thousands(breakdown.minutes())),
        ("Seconds", group_thousands(breakdown.seconds())),
    ];

    let align_width = rows
        .iter()
        .map(|(k, v)| k.len() + 2 + v.len())
        .max()
        .unwrap_or(0)
        .max(PANEL_MIN_WIDTH);

    let mut out = String::new();
    out.push_str(&header_line("Age breakdown", align_width));
    out.push('\n');
    for (key, value) in &rows {
        out.push_str(&stat_row(key, value, align_width));
        out.push('\n');
    }
    out
}

/// Header naming the next anniversary, e.g. "Time until next birthday (01 January 2025)".
pub fn anniversary_header(next_anniversary: NaiveDate) -> String {
    format!(
        "Time until next birthday ({})",
        next_anniversary.format("%d %B %Y")
    )
}

/// One countdown frame: "DDd HHh MMm SSs", all fields zero-padded.
pub fn countdown_line(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("\u{23f3} {days:02}d {hours:02}h {minutes:02}m {seconds:02}s")
}

/// Live countdown: redraws the frame in place once per second, decrementing a
/// locally held counter, and ends with the birthday banner at zero.
pub async fn run_countdown(seconds_remaining: i64) -> Result<()> {
    let mut remaining = seconds_remaining.max(0);
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    let mut out = io::stdout();

    loop {
        tick.tick().await;
        write!(out, "\r{}", countdown_line(remaining)).context("writing countdown frame")?;
        out.flush().context("flushing countdown frame")?;
        if remaining == 0 {
            break;
        }
        remaining -= 1;
    }

    writeln!(out)?;
    writeln!(out, "{BIRTHDAY_BANNER}")?;
    Ok(())
}

/// JSON shape for `--json`: the breakdown record plus its derived display
/// quantities, flattened into one object.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
    pub weeks: i64,
    pub remaining_days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub next_anniversary: NaiveDate,
    pub seconds_remaining: i64,
    pub is_anniversary_today: bool,
}

impl From<&AgeBreakdown> for JsonReport {
    fn from(b: &AgeBreakdown) -> Self {
        Self {
            years: b.years,
            months: b.months,
            days: b.days,
            total_days: b.total_days,
            weeks: b.weeks(),
            remaining_days: b.remaining_days(),
            hours: b.hours(),
            minutes: b.minutes(),
            seconds: b.seconds(),
            next_anniversary: b.next_anniversary,
            seconds_remaining: b.seconds_remaining,
            is_anniversary_today: b.is_anniversary_today,
        }
    }
}
