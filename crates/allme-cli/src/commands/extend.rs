use allme_core::recurrence::GenerationWindow;
use allme_core::repository::{Repository, SeriesRepository};
use anyhow::{bail, Result};
use owo_colors::OwoColorize;

use crate::cli::ExtendCommand;
use crate::config::Config;
use crate::util::resolve_task;

pub async fn extend_series(
    repo: &impl Repository,
    config: &Config,
    command: ExtendCommand,
) -> Result<()> {
    let task = resolve_task(repo, &config.owner, &command.id).await?;
    let Some(series_id) = task.series_id else {
        bail!("'{}' is not part of a recurring series.", task.title);
    };

    let today = chrono::Local::now().date_naive();
    let horizon = command.days.unwrap_or(config.recurrence.horizon_days);
    let window = GenerationWindow::forward(today, horizon);

    let created = repo
        .regenerate_series(series_id, &config.owner, window)
        .await?;
    println!(
        "{} Materialized {} new occurrence(s) for '{}'",
        "✓".green().bold(),
        created,
        task.title.bright_white().bold()
    );

    Ok(())
}
