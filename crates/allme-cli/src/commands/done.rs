use allme_core::repository::{Repository, SeriesRepository, TaskRepository};
use anyhow::{bail, Result};
use owo_colors::OwoColorize;

use crate::cli::DoneCommand;
use crate::config::Config;
use crate::util::resolve_task;

pub async fn done_task(repo: &impl Repository, config: &Config, command: DoneCommand) -> Result<()> {
    let task = resolve_task(repo, &config.owner, &command.id).await?;

    if command.series {
        let Some(series_id) = task.series_id else {
            bail!("'{}' is not part of a recurring series.", task.title);
        };
        let count = repo.complete_series(series_id, &config.owner).await?;
        println!(
            "{} Completed series '{}' ({} records updated)",
            "✓".green().bold(),
            task.title.bright_white().bold(),
            count
        );
    } else {
        let completed = repo.complete_occurrence(task.id, &config.owner).await?;
        println!(
            "{} Completed: {}",
            "✓".green().bold(),
            completed.title.bright_white().bold()
        );
    }

    Ok(())
}
