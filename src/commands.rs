use crate::calendar;
use crate::model::{Event, EventIndex};
use crate::storage::{load_events, locate_events_file, save_events, EventsLocation};
use crate::ui;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn tui(file: Option<PathBuf>) -> Result<()> {
    let (index, location) = load_current_index(file)?;
    ui::run(index, location)
}

pub fn list(file: Option<PathBuf>, date: Option<String>, month: Option<String>) -> Result<()> {
    let (index, _) = load_current_index(file)?;
    let events = match (date, month) {
        (Some(date), _) => index.events_for_date(calendar::parse_date(&date)?),
        (None, Some(month)) => {
            let (year, month) = parse_month(&month)?;
            index.events_for_month(year, month)
        }
        (None, None) => {
            let mut all = index.all().to_vec();
            all.sort_by_key(|e| (e.date, e.time));
            all
        }
    };
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in events {
        print_event(&event);
    }
    Ok(())
}

pub fn add(file: Option<PathBuf>, date: String, time: String, description: String) -> Result<()> {
    let (mut index, location) = load_current_index(file)?;
    let event = Event::new(
        calendar::parse_date(&date)?,
        calendar::parse_time(&time)?,
        description,
    )?;
    index.add(event.clone());
    save_events(&location, index.all())?;
    println!(
        "Added {} {}  {}",
        event.date_string(),
        event.time_string(),
        event.description
    );
    Ok(())
}

pub fn search(file: Option<PathBuf>, query: String) -> Result<()> {
    let (index, _) = load_current_index(file)?;
    let hits = index.search(&query);
    if hits.is_empty() {
        println!("No events matching \"{}\"", query);
        return Ok(());
    }
    for event in hits {
        print_event(&event);
    }
    Ok(())
}

fn load_current_index(file: Option<PathBuf>) -> Result<(EventIndex, EventsLocation)> {
    let location = locate_events_file(file)?;
    let events = load_events(&location)?;
    Ok((EventIndex::new(events), location))
}

fn parse_month(input: &str) -> Result<(i32, u32)> {
    let trimmed = input.trim();
    let (year, month) = trimmed
        .split_once('-')
        .ok_or_else(|| anyhow!("invalid month (use YYYY-MM): {}", input))?;
    let year: i32 = year
        .parse()
        .map_err(|_| anyhow!("invalid month (use YYYY-MM): {}", input))?;
    let month: u32 = month
        .parse()
        .map_err(|_| anyhow!("invalid month (use YYYY-MM): {}", input))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("month out of range: {}", input));
    }
    Ok((year, month))
}

fn print_event(event: &Event) {
    println!(
        "{} {}  {}",
        event.date_string(),
        event.time_string(),
        event.description
    );
}
