use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, NaiveTime};

/// Number of days in the given month, via the first of the next month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of(year, month).day()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn first_day_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month")
}

pub fn last_day_of(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_day_of(next_year, next_month)
        .pred_opt()
        .expect("previous day exists")
}

/// Weekday of the first day of the month, Sunday = 0.
pub fn first_weekday_of(year: i32, month: u32) -> u32 {
    first_day_of(year, month).weekday().num_days_from_sunday()
}

/// Calendar month addition over a day-1-normalized date.
pub fn add_months(month_start: NaiveDate, delta: i32) -> NaiveDate {
    let total = month_start.year() * 12 + month_start.month0() as i32 + delta;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    first_day_of(year, month)
}

/// Week rows for a month grid, Sunday-first; 0 marks cells outside the month.
pub fn month_weeks(year: i32, month: u32) -> Vec<[u32; 7]> {
    let days = days_in_month(year, month);
    let mut weeks = Vec::new();
    let mut week = [0u32; 7];
    let mut slot = first_weekday_of(year, month) as usize;
    for day in 1..=days {
        week[slot] = day;
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [0; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date (use YYYY-MM-DD): {}", input))
}

pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow!("invalid time (use HH:MM): {}", input))
}
