use std::{env, fs, process};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};

use civic_events::scrape::EventScraper;
use civic_events::{cli, week, Event};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "civic_events=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

fn main() {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());

    let Some(week_start_day) = args.week_start_day.or_else(cli::prompt_week_start_day) else {
        return;
    };
    let Some(target_week) = args.target_week.or_else(cli::prompt_target_week) else {
        return;
    };

    if let Err(err) = run(week_start_day, target_week) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(week_start_day: Weekday, target_week: NaiveDate) -> Result<()> {
    let scraper = EventScraper::new()?;
    let events = scraper.scrape()?;

    write_json("events.json", &events)?;
    println!("Saved {} events to events.json", events.len());

    let (week_start, week_end) = week::week_bounds(week_start_day, target_week);
    println!(
        "Filtering events for week: {} - {}",
        week_start.format("%b %d, %Y"),
        week_end.format("%b %d, %Y")
    );

    let filtered = week::filter_by_week(&events, week_start_day, target_week);

    let filename = format!(
        "events_week_{}_{}.json",
        target_week.format("%Y-%m-%d"),
        cli::day_name(week_start_day).to_lowercase()
    );
    write_json(&filename, &filtered)?;
    println!(
        "\nSaved {} events for the specified week to {filename}",
        filtered.len()
    );

    println!(
        "\nEvents for week starting on {} (week starts on {}):",
        target_week.format("%Y-%m-%d"),
        cli::day_name(week_start_day)
    );
    if filtered.is_empty() {
        println!("  No events found for this week.");
    } else {
        for event in &filtered {
            println!("  - {} {}: {}", event.date, event.time, event.title);
        }
    }

    Ok(())
}

fn write_json(path: &str, events: &[Event]) -> Result<()> {
    let json = serde_json::to_string_pretty(events).context("serializing events")?;
    fs::write(path, json).with_context(|| format!("writing {path}"))?;
    Ok(())
}
