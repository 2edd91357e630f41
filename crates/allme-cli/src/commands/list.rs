use allme_core::models::DateFilter;
use allme_core::repository::{Repository, TaskRepository};
use anyhow::Result;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::parser::parse_date_arg;
use crate::views::table::display_tasks;

pub async fn list_tasks(
    repo: &impl Repository,
    config: &Config,
    command: ListCommand,
) -> Result<()> {
    let filter = match (command.from, command.to) {
        (Some(from), Some(to)) => Some(DateFilter::Between(
            parse_date_arg(&from)?,
            parse_date_arg(&to)?,
        )),
        _ => None,
    };

    let tasks = repo.list_visible_tasks(&config.owner, filter).await?;
    display_tasks(&tasks);
    Ok(())
}
