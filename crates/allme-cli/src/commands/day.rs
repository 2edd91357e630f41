use std::collections::HashMap;

use allme_core::date::format_date;
use allme_core::models::{DateFilter, Task, TaskStatus};
use allme_core::repository::{Repository, TaskRepository};
use allme_core::timeline::{DaySchedule, LayoutEntry};
use anyhow::Result;
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::cli::DayCommand;
use crate::config::Config;
use crate::parser::parse_date_arg;
use crate::util::short_id;

pub async fn day_view(repo: &impl Repository, config: &Config, command: DayCommand) -> Result<()> {
    let date = match command.date {
        Some(s) => parse_date_arg(&s)?,
        None => chrono::Local::now().date_naive(),
    };

    let tasks = repo
        .list_visible_tasks(&config.owner, Some(DateFilter::On(date)))
        .await?;
    if tasks.is_empty() {
        println!("Nothing scheduled for {}.", format_date(date));
        return Ok(());
    }

    let by_id: HashMap<Uuid, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
    let schedule = DaySchedule::build(&tasks);

    println!("{}", format_date(date).bold());

    if !schedule.all_day.is_empty() {
        println!("\n{}", "All day".underline());
        for id in &schedule.all_day {
            let task = by_id[id];
            println!("  {}  {}", short_id(*id).bright_black(), styled_title(task));
        }
    }

    if !schedule.timed.is_empty() {
        println!("\n{}", "Timeline".underline());
        let mut entries = schedule.timed.clone();
        entries.sort_by_key(|e| (e.start_minute, e.column));
        for entry in &entries {
            let task = by_id[&entry.id];
            println!(
                "  {}  {}{}{}",
                span(entry),
                "      ".repeat(entry.column),
                styled_title(task),
                lane_badge(entry)
            );
        }
    }

    Ok(())
}

fn span(entry: &LayoutEntry) -> String {
    format!(
        "{:02}:{:02}-{:02}:{:02}",
        entry.start_minute / 60,
        entry.start_minute % 60,
        entry.end_minute / 60,
        entry.end_minute % 60
    )
}

fn lane_badge(entry: &LayoutEntry) -> String {
    if entry.column_count > 1 {
        format!(" [{}/{}]", entry.column + 1, entry.column_count)
    } else {
        String::new()
    }
}

fn styled_title(task: &Task) -> String {
    if task.status == TaskStatus::Done {
        task.title.strikethrough().to_string()
    } else {
        task.title.clone()
    }
}
