use allme_core::repository::{Repository, SeriesRepository, TaskRepository};
use anyhow::{bail, Result};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::cli::DeleteCommand;
use crate::config::Config;
use crate::util::resolve_task;

pub async fn delete_task(
    repo: &impl Repository,
    config: &Config,
    command: DeleteCommand,
) -> Result<()> {
    let task = resolve_task(repo, &config.owner, &command.id).await?;

    if !command.force {
        let prompt = if command.series {
            format!(
                "Delete the whole series '{}' including future occurrences?",
                task.title
            )
        } else {
            format!("Are you sure you want to delete task '{}'?", task.title)
        };
        let confirmation = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    if command.series {
        let Some(series_id) = task.series_id else {
            bail!("'{}' is not part of a recurring series.", task.title);
        };
        let count = repo.delete_series(series_id, &config.owner).await?;
        println!(
            "{} Deleted series '{}' ({} records removed)",
            "✓".green().bold(),
            task.title.bright_white().bold(),
            count
        );
    } else {
        repo.delete_occurrence(task.id, &config.owner).await?;
        println!(
            "{} Deleted: {}",
            "✓".green().bold(),
            task.title.bright_white().bold()
        );
    }

    Ok(())
}
