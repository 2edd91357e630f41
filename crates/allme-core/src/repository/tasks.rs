use crate::error::CoreError;
use crate::models::{
    validate_time_pair, DateFilter, NewTaskData, Task, TaskPriority, TaskStatus, UpdateTaskData,
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
use crate::repository::{insert_task, SqliteRepository, TaskRepository};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;
use uuid::Uuid;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn create_task(&self, owner_id: &str, data: NewTaskData) -> Result<Task, CoreError> {
        data.validate()?;
        let due_date = data.due_date.ok_or_else(|| {
            CoreError::Validation("a non-recurring task needs a due date".to_string())
        })?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::now_v7(),
            owner_id: owner_id.to_string(),
            title: data.title,
            description: data.description,
            due_date: Some(due_date),
            start_time: data.start_time,
            end_time: data.end_time,
            is_recurring: false,
            recurrence_days: None,
            recurrence_end_date: None,
            series_id: None,
            priority: data.priority.unwrap_or(TaskPriority::Medium),
            status: TaskStatus::Todo,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        insert_task(self.pool(), &task).await?;
        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid, owner_id: &str) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn list_visible_tasks(
        &self,
        owner_id: &str,
        filter: Option<DateFilter>,
    ) -> Result<Vec<Task>, CoreError> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM tasks WHERE owner_id = ");
        qb.push_bind(owner_id);
        // Templates (series rows without a due date) are internal only.
        qb.push(" AND NOT (series_id IS NOT NULL AND due_date IS NULL)");
        match filter {
            Some(DateFilter::On(date)) => {
                qb.push(" AND due_date = ");
                qb.push_bind(date);
            }
            Some(DateFilter::Between(start, end)) => {
                qb.push(" AND due_date BETWEEN ");
                qb.push_bind(start);
                qb.push(" AND ");
                qb.push_bind(end);
            }
            None => {}
        }
        qb.push(" ORDER BY due_date, start_time, created_at");

        let tasks: Vec<Task> = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner_id: &str,
        data: UpdateTaskData,
    ) -> Result<Task, CoreError> {
        let mut task = self
            .find_task_by_id(id, owner_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = description;
        }
        if let Some(due_date) = data.due_date {
            task.due_date = due_date;
        }
        if let Some(start_time) = data.start_time {
            task.start_time = start_time;
        }
        if let Some(end_time) = data.end_time {
            task.end_time = end_time;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(status) = data.status {
            if status != task.status {
                task.completed_at = match status {
                    TaskStatus::Done => Some(Utc::now()),
                    _ => None,
                };
                task.status = status;
            }
        }
        validate_patched(&task)?;

        task.updated_at = Utc::now();
        sqlx::query(
            r#"UPDATE tasks
            SET title = $1, description = $2, due_date = $3, start_time = $4,
                end_time = $5, priority = $6, status = $7, completed_at = $8,
                updated_at = $9
            WHERE id = $10 AND owner_id = $11"#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.start_time)
        .bind(task.end_time)
        .bind(&task.priority)
        .bind(&task.status)
        .bind(task.completed_at)
        .bind(task.updated_at)
        .bind(id)
        .bind(owner_id)
        .execute(self.pool())
        .await?;

        Ok(task)
    }

    async fn complete_occurrence(&self, id: Uuid, owner_id: &str) -> Result<Task, CoreError> {
        let now = Utc::now();
        // `fetch_all` drives the UPDATE ... RETURNING statement to completion so
        // the autocommit write is finalized; `fetch_optional`/`fetch_one` can
        // short-circuit stepping under sqlx 0.7's SQLite driver and leave the
        // write uncommitted. The WHERE clause matches at most one row.
        let task: Task = sqlx::query_as(
            r#"UPDATE tasks
            SET status = $1, completed_at = $2, updated_at = $2
            WHERE id = $3 AND owner_id = $4
            RETURNING *"#,
        )
        .bind(TaskStatus::Done)
        .bind(now)
        .bind(id)
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        debug!(task_id = %id, "completed task");
        Ok(task)
    }

    async fn delete_occurrence(&self, id: Uuid, owner_id: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        debug!(task_id = %id, "deleted task");
        Ok(())
    }
}

/// Re-checks row constraints after a patch has been applied in memory.
fn validate_patched(task: &Task) -> Result<(), CoreError> {
    if task.title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if task.title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title longer than {} characters",
            MAX_TITLE_LEN
        )));
    }
    if let Some(description) = &task.description {
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(CoreError::Validation(format!(
                "description longer than {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }
    validate_time_pair(task.start_time, task.end_time)?;
    // Only a series template may lack a due date; a patch must not turn a
    // visible row into one.
    if task.due_date.is_none() {
        return Err(CoreError::Validation(
            "a task cannot lose its due date".to_string(),
        ));
    }
    Ok(())
}
