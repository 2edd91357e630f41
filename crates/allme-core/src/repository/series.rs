use crate::error::CoreError;
use crate::models::{NewTaskData, SeriesOutcome, Task, TaskPriority, TaskStatus};
use crate::recurrence::{expand, GenerationWindow, RecurrenceRule};
use crate::repository::{insert_task, SqliteRepository};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

#[async_trait]
impl super::SeriesRepository for SqliteRepository {
    async fn create_series(
        &self,
        owner_id: &str,
        fields: NewTaskData,
        rule: RecurrenceRule,
        window: GenerationWindow,
    ) -> Result<SeriesOutcome, CoreError> {
        fields.validate()?;
        if rule.weekdays.is_empty() {
            return Err(CoreError::Validation(
                "a recurring task needs at least one weekday".to_string(),
            ));
        }

        let mut tx = self.pool().begin().await?;
        let now = Utc::now();

        // The template's own id doubles as the series id.
        let series_id = Uuid::now_v7();
        let template = Task {
            id: series_id,
            owner_id: owner_id.to_string(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            due_date: None,
            start_time: fields.start_time,
            end_time: fields.end_time,
            is_recurring: true,
            recurrence_days: Some(rule.weekdays),
            recurrence_end_date: rule.until,
            series_id: Some(series_id),
            priority: fields.priority.clone().unwrap_or(TaskPriority::Medium),
            status: TaskStatus::Todo,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        insert_task(&mut *tx, &template).await?;

        let dates = expand(&rule, window);
        for date in &dates {
            let occurrence = Task {
                id: Uuid::now_v7(),
                due_date: Some(*date),
                created_at: now,
                updated_at: now,
                ..template.clone()
            };
            insert_task(&mut *tx, &occurrence).await?;
        }

        tx.commit().await?;

        info!(
            series_id = %series_id,
            occurrences = dates.len(),
            "created recurring series"
        );
        Ok(SeriesOutcome {
            series_id,
            occurrence_count: dates.len() as u64,
        })
    }

    async fn complete_series(&self, series_id: Uuid, owner_id: &str) -> Result<u64, CoreError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"UPDATE tasks
            SET status = $1, completed_at = $2, updated_at = $2
            WHERE series_id = $3 AND owner_id = $4 AND status != $1"#,
        )
        .bind(TaskStatus::Done)
        .bind(now)
        .bind(series_id)
        .bind(owner_id)
        .execute(self.pool())
        .await?;

        let count = result.rows_affected();
        debug!(series_id = %series_id, count, "completed series");
        Ok(count)
    }

    async fn delete_series(&self, series_id: Uuid, owner_id: &str) -> Result<u64, CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE series_id = $1 AND owner_id = $2")
            .bind(series_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        let count = result.rows_affected();
        debug!(series_id = %series_id, count, "deleted series");
        Ok(count)
    }

    async fn regenerate_series(
        &self,
        series_id: Uuid,
        owner_id: &str,
        window: GenerationWindow,
    ) -> Result<u64, CoreError> {
        let mut tx = self.pool().begin().await?;

        // Unknown or foreign series: quietly a no-op, like the other
        // series-wide operations.
        let template: Option<Task> = sqlx::query_as(
            "SELECT * FROM tasks WHERE series_id = $1 AND owner_id = $2 AND due_date IS NULL",
        )
        .bind(series_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(template) = template else {
            return Ok(0);
        };

        let weekdays = template.recurrence_days.ok_or_else(|| {
            CoreError::Validation("series template has no weekday set".to_string())
        })?;
        let rule = RecurrenceRule {
            weekdays,
            // The template is the rule's source of truth; for a top-up the
            // window start stands in for the original origin, which never
            // postdates an extension window.
            origin: window.start,
            until: template.recurrence_end_date,
        };
        let dates = expand(&rule, window);

        let existing: HashSet<NaiveDate> = sqlx::query(
            "SELECT due_date FROM tasks WHERE series_id = $1 AND due_date IS NOT NULL",
        )
        .bind(series_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|row| row.get("due_date"))
        .collect();

        let now = Utc::now();
        let mut created = 0u64;
        for date in dates {
            if existing.contains(&date) {
                continue;
            }
            let occurrence = Task {
                id: Uuid::now_v7(),
                due_date: Some(date),
                status: TaskStatus::Todo,
                completed_at: None,
                created_at: now,
                updated_at: now,
                ..template.clone()
            };
            insert_task(&mut *tx, &occurrence).await?;
            created += 1;
        }

        tx.commit().await?;

        info!(series_id = %series_id, created, "regenerated series occurrences");
        Ok(created)
    }
}
