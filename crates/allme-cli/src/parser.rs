use allme_core::date::{parse_date, TimeOfDay, WeekdaySet};
use allme_core::models::TaskPriority;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    parse_date(input).map_err(|_| {
        anyhow!(
            "Invalid date: '{}'\n\nDates use the form YYYY-MM-DD, e.g. 2026-01-05",
            input
        )
    })
}

pub fn parse_time_arg(input: &str) -> Result<TimeOfDay> {
    input.parse().map_err(|_| {
        anyhow!(
            "Invalid time: '{}'\n\nTimes use 24-hour HH:MM, e.g. 09:30 or 17:00",
            input
        )
    })
}

pub fn parse_priority_arg(input: &str) -> Result<TaskPriority> {
    input
        .parse()
        .map_err(|_| anyhow!("Invalid priority: '{}' (expected low, medium or high)", input))
}

/// Parses weekday lists like "mon,wed,fri", plus the common shorthands.
pub fn parse_weekdays_arg(input: &str) -> Result<WeekdaySet> {
    let set: WeekdaySet = match input.trim().to_lowercase().as_str() {
        "weekdays" | "workdays" => "mon,tue,wed,thu,fri".parse().unwrap(),
        "weekends" => "sat,sun".parse().unwrap(),
        "daily" | "everyday" => WeekdaySet::full(),
        other => other.parse().map_err(|_| {
            anyhow!(
                "Invalid weekday list: '{}'\n\nUse three-letter codes (sun,mon,tue,wed,thu,fri,sat), \
                 e.g. 'mon,wed', or a shorthand: weekdays, weekends, daily",
                input
            )
        })?,
    };
    if set.is_empty() {
        return Err(anyhow!("No weekdays given in: '{}'", input));
    }
    Ok(set)
}
