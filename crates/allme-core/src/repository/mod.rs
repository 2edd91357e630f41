//! Data access layer.
//!
//! Every operation is scoped by an opaque `owner_id`: a query or mutation
//! only ever sees rows carrying the caller's tag. Series-wide operations
//! naming a series the caller does not own affect zero rows rather than
//! failing, so callers cannot probe for other users' series ids.

use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{DateFilter, NewTaskData, SeriesOutcome, Task, UpdateTaskData};
use crate::recurrence::{GenerationWindow, RecurrenceRule};
use async_trait::async_trait;
use sqlx::sqlite::Sqlite;
use uuid::Uuid;

pub mod series;
pub mod tasks;

/// Single-record operations and the visible-task read surface.
#[async_trait]
pub trait TaskRepository {
    /// Creates an ordinary, non-recurring task. Requires a due date.
    async fn create_task(&self, owner_id: &str, data: NewTaskData) -> Result<Task, CoreError>;

    async fn find_task_by_id(&self, id: Uuid, owner_id: &str) -> Result<Option<Task>, CoreError>;

    /// All user-visible tasks: plain tasks and series occurrences, never
    /// series templates.
    async fn list_visible_tasks(
        &self,
        owner_id: &str,
        filter: Option<DateFilter>,
    ) -> Result<Vec<Task>, CoreError>;

    async fn update_task(
        &self,
        id: Uuid,
        owner_id: &str,
        data: UpdateTaskData,
    ) -> Result<Task, CoreError>;

    /// Marks exactly one task done. Siblings in the same series are never
    /// touched.
    async fn complete_occurrence(&self, id: Uuid, owner_id: &str) -> Result<Task, CoreError>;

    /// Removes exactly one task.
    async fn delete_occurrence(&self, id: Uuid, owner_id: &str) -> Result<(), CoreError>;
}

/// Series lifecycle: template + materialized occurrences as one unit.
#[async_trait]
pub trait SeriesRepository {
    /// Creates a recurring series: one hidden template row holding the
    /// rule, plus one occurrence row per date the rule hits inside
    /// `window`. The whole write is a single transaction.
    async fn create_series(
        &self,
        owner_id: &str,
        fields: NewTaskData,
        rule: RecurrenceRule,
        window: GenerationWindow,
    ) -> Result<SeriesOutcome, CoreError>;

    /// Marks every not-yet-done record of the series done. Idempotent:
    /// a second call, or an unknown/foreign series id, affects zero rows.
    async fn complete_series(&self, series_id: Uuid, owner_id: &str) -> Result<u64, CoreError>;

    /// Removes every record of the series, template included. An
    /// unknown/foreign series id removes zero rows.
    async fn delete_series(&self, series_id: Uuid, owner_id: &str) -> Result<u64, CoreError>;

    /// Tops up a series with the occurrence rows missing from `window`,
    /// re-expanding the template's rule. Safe to re-run; also the repair
    /// path when an earlier occurrence write failed after the template
    /// landed.
    async fn regenerate_series(
        &self,
        series_id: Uuid,
        owner_id: &str,
        window: GenerationWindow,
    ) -> Result<u64, CoreError>;
}

/// Composite repository trait for consumers that need the full surface.
pub trait Repository: TaskRepository + SeriesRepository {}

/// SQLite implementation of the repository.
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}

/// Inserts one fully-formed task row.
pub(crate) async fn insert_task<'e, E>(executor: E, task: &Task) -> Result<(), CoreError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO tasks (
            id, owner_id, title, description, due_date, start_time, end_time,
            is_recurring, recurrence_days, recurrence_end_date, series_id,
            priority, status, completed_at, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"#,
    )
    .bind(task.id)
    .bind(&task.owner_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.due_date)
    .bind(task.start_time)
    .bind(task.end_time)
    .bind(task.is_recurring)
    .bind(task.recurrence_days)
    .bind(task.recurrence_end_date)
    .bind(task.series_id)
    .bind(&task.priority)
    .bind(&task.status)
    .bind(task.completed_at)
    .bind(task.created_at)
    .bind(task.updated_at)
    .execute(executor)
    .await?;
    Ok(())
}
