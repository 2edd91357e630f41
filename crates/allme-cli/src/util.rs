use allme_core::models::Task;
use allme_core::repository::{Repository, TaskRepository};
use anyhow::{anyhow, bail, Result};
use uuid::Uuid;

/// Resolves a full UUID or a unique id prefix to one visible task.
pub async fn resolve_task(repo: &impl Repository, owner: &str, input: &str) -> Result<Task> {
    if let Ok(id) = input.parse::<Uuid>() {
        return repo
            .find_task_by_id(id, owner)
            .await?
            .ok_or_else(|| anyhow!("Task with ID '{}' not found.", input));
    }

    let visible = repo.list_visible_tasks(owner, None).await?;
    let matches: Vec<Task> = visible
        .into_iter()
        .filter(|t| t.id.to_string().starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("Task with ID '{}' not found.", input),
        1 => Ok(matches.into_iter().next().unwrap()),
        _ => {
            let candidates = matches
                .iter()
                .map(|t| format!("  {} ({})", t.id, t.title))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("Ambiguous ID '{}'. Did you mean one of these?\n{}", input, candidates)
        }
    }
}

/// Short display form of a task id.
pub fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}
