use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::date::{TimeOfDay, WeekdaySet};
use crate::error::CoreError;

/// Longest accepted task title.
pub const MAX_TITLE_LEN: usize = 200;
/// Longest accepted task description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

/// One persisted task row.
///
/// Three kinds of row share this shape:
/// - a plain task: `series_id` absent, `due_date` present;
/// - a series template: `series_id` set (to its own id), `due_date` absent,
///   rule fields populated; never shown to the user;
/// - a series occurrence: `series_id` shared with its template, `due_date`
///   set to the occurrence date, rule fields copied from the template.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    /// Opaque owner tag; every query and mutation is scoped by it.
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub is_recurring: bool,
    pub recurrence_days: Option<WeekdaySet>,
    pub recurrence_end_date: Option<NaiveDate>,
    pub series_id: Option<Uuid>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether this row is a series template (rule holder, never due).
    pub fn is_template(&self) -> bool {
        self.series_id.is_some() && self.due_date.is_none()
    }
}

/// Content fields for a new task or series.
#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub priority: Option<TaskPriority>,
}

impl NewTaskData {
    /// Checks the field-level constraints shared by plain tasks and series.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".to_string()));
        }
        if self.title.len() > MAX_TITLE_LEN {
            return Err(CoreError::Validation(format!(
                "title longer than {} characters",
                MAX_TITLE_LEN
            )));
        }
        if let Some(description) = &self.description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err(CoreError::Validation(format!(
                    "description longer than {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }
        validate_time_pair(self.start_time, self.end_time)?;
        Ok(())
    }
}

/// Field patch for a single task row. The double `Option` distinguishes
/// "leave untouched" from "clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub start_time: Option<Option<TimeOfDay>>,
    pub end_time: Option<Option<TimeOfDay>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

/// Result of creating a recurring series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOutcome {
    pub series_id: Uuid,
    /// Occurrence rows materialized for the initial window. Zero is valid:
    /// the rule may not hit any date inside the window yet.
    pub occurrence_count: u64,
}

/// Date constraint for the visible-task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Tasks due on exactly this date (the day view).
    On(NaiveDate),
    /// Tasks due in this inclusive range (the month grid).
    Between(NaiveDate, NaiveDate),
}

/// A start/end time pair must be ordered; a lone end time has nothing to be
/// ordered against.
pub(crate) fn validate_time_pair(
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
) -> Result<(), CoreError> {
    match (start, end) {
        (Some(start), Some(end)) if end <= start => Err(CoreError::Validation(
            "end time must be later than start time".to_string(),
        )),
        (None, Some(_)) => Err(CoreError::Validation(
            "end time requires a start time".to_string(),
        )),
        _ => Ok(()),
    }
}
