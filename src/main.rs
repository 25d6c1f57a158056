use agecalc::age::{self, BirthDate};
use agecalc::{input, render};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Computes your exact age and counts down to your next birthday.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Birth date as YYYY-MM-DD; prompts interactively when omitted.
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Reference instant as YYYY-MM-DDTHH:MM:SS instead of the current UTC time.
    #[arg(long, value_name = "DATETIME")]
    now: Option<NaiveDateTime>,

    /// Emit the breakdown as JSON instead of the text panel.
    #[arg(long)]
    json: bool,

    /// Keep a live once-per-second countdown running after the breakdown.
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // "Now" is captured exactly once; the core never reads the clock itself.
    let now = cli.now.unwrap_or_else(|| Utc::now().naive_utc());

    let birth = match cli.date {
        Some(date) => BirthDate::from_date(date)?,
        None => input::prompt_birth_date(now.date().year())?,
    };
    debug!(?birth, %now, "computing age breakdown");

    let breakdown = age::compute(birth, now).context("age computation failed")?;
    debug!(?breakdown, "computed");

    if cli.json {
        let report = render::JsonReport::from(&breakdown);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if breakdown.is_anniversary_today {
        println!("{}", render::BIRTHDAY_BANNER);
        println!();
    }

    print!("{}", render::breakdown_panel(&breakdown));
    println!();
    println!("{}", render::anniversary_header(breakdown.next_anniversary));

    if cli.watch {
        render::run_countdown(breakdown.seconds_remaining).await?;
    } else {
        println!("{}", render::countdown_line(breakdown.seconds_remaining));
    }

    Ok(())
}
