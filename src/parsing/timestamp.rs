//! Date and time resolution for captured timestamp fields.
//!
//! Dates containing `-` are read as year-month-day, anything else as
//! day/month/year. Two-digit years are `2000 + yy`. Times accept an optional
//! AM/PM suffix with the usual 12-hour adjustment.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a captured date field.
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    let date = date.trim();
    let (parts, iso): (Vec<&str>, bool) = if date.contains('-') {
        (date.split('-').collect(), true)
    } else {
        (date.split('/').collect(), false)
    };

    if parts.len() != 3 {
        return Err(format!("expected three date components in '{date}'"));
    }

    let number = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("'{s}' is not a number"))
    };

    let (year, month, day) = if iso {
        (number(parts[0])?, number(parts[1])?, number(parts[2])?)
    } else {
        (number(parts[2])?, number(parts[1])?, number(parts[0])?)
    };

    let year = if year < 100 { 2000 + year } else { year };

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
}

/// Parses a captured time field, applying the AM/PM adjustment.
pub fn parse_time(time: &str) -> Result<NaiveTime, String> {
    let trimmed = time.trim();
    let lower = trimmed.to_ascii_lowercase();

    let (clock, meridiem) = if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim(), Some(true))
    } else if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim(), Some(false))
    } else {
        (lower.as_str(), None)
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(format!("expected H:MM[:SS] in '{trimmed}'"));
    }

    let number = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| format!("'{s}' is not a number"))
    };

    let mut hour = number(parts[0])?;
    let minute = number(parts[1])?;
    let second = match parts.get(2) {
        Some(s) => number(s)?,
        None => 0,
    };

    match meridiem {
        Some(true) if hour != 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| format!("{hour}:{minute:02}:{second:02} is not a valid time"))
}

/// Resolves captured date and time fields into one timestamp.
pub fn resolve_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}
