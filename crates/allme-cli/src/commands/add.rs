use allme_core::models::NewTaskData;
use allme_core::recurrence::RecurrenceRule;
use allme_core::repository::{Repository, SeriesRepository, TaskRepository};
use anyhow::Result;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::config::Config;
use crate::parser::{parse_date_arg, parse_priority_arg, parse_time_arg, parse_weekdays_arg};

pub async fn add_task(
    repo: &impl Repository,
    config: &Config,
    command: AddCommand,
) -> Result<()> {
    let due = command.due.as_deref().map(parse_date_arg).transpose()?;
    let fields = NewTaskData {
        title: command.title,
        description: command.description,
        due_date: due,
        start_time: command.start.as_deref().map(parse_time_arg).transpose()?,
        end_time: command.end.as_deref().map(parse_time_arg).transpose()?,
        priority: command
            .priority
            .as_deref()
            .map(parse_priority_arg)
            .transpose()?,
    };

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    if let Some(on) = command.on {
        let weekdays = parse_weekdays_arg(&on)?;
        let until = command.until.as_deref().map(parse_date_arg).transpose()?;
        let today = chrono::Local::now().date_naive();
        let rule = RecurrenceRule {
            weekdays,
            origin: due.unwrap_or(today),
            until,
        };
        let window = config.recurrence.window_from(today);
        let title = fields.title.clone();

        let outcome = repo
            .create_series(&config.owner, fields, rule, window)
            .await?;

        println!(
            "{} Created recurring task: {}",
            "✓".style(success_style),
            title.bright_white().bold()
        );
        println!(
            "  {} Series ID: {}",
            "→".style(info_style),
            outcome.series_id.to_string().yellow()
        );
        println!(
            "  {} {} occurrences materialized through {}",
            "→".style(info_style),
            outcome.occurrence_count,
            allme_core::date::format_date(window.end).cyan()
        );
    } else {
        let task = repo.create_task(&config.owner, fields).await?;

        println!(
            "{} Created task: {}",
            "✓".style(success_style),
            task.title.bright_white().bold()
        );
        println!(
            "  {} Task ID: {}",
            "→".style(info_style),
            task.id.to_string().yellow()
        );
    }

    Ok(())
}
