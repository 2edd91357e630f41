//! # AllMe Core Library
//!
//! The data core of the AllMe productivity dashboard: tasks, weekly
//! recurring series materialized as one row per occurrence, and the
//! day-timeline layout that places overlapping tasks side by side.
//!
//! ## Features
//!
//! - **Materialized recurrence**: a weekly rule becomes one hidden template
//!   row plus concrete, individually completable occurrence rows sharing a
//!   series id, with no virtual expansion at read time
//! - **Series-wide mutations**: complete or delete a whole series as a
//!   unit, scoped by owner, idempotent where it matters
//! - **Collision-free day layout**: a sweep-line pass groups transitively
//!   overlapping tasks and assigns deterministic columns
//! - **Owner scoping**: every query and mutation carries an opaque owner
//!   tag; foreign rows are invisible, not forbidden
//!
//! ## Core Modules
//!
//! - [`date`]: calendar dates, times of day, weekday sets
//! - [`recurrence`]: rule expansion over bounded generation windows
//! - [`timeline`]: overlap grouping and column assignment
//! - [`models`]: task rows and transfer objects
//! - [`repository`]: SQLite-backed task and series operations
//! - [`db`]: connection pool and migrations
//! - [`error`]: error taxonomy
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use allme_core::db;
//! use allme_core::models::NewTaskData;
//! use allme_core::recurrence::{MaterializationConfig, RecurrenceRule};
//! use allme_core::repository::{SeriesRepository, SqliteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), allme_core::error::CoreError> {
//!     let pool = db::establish_connection("allme.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let today = chrono::Local::now().date_naive();
//!     let rule = RecurrenceRule {
//!         weekdays: "mon,wed".parse().expect("well-formed weekday codes"),
//!         origin: today,
//!         until: None,
//!     };
//!     let window = MaterializationConfig::default().window_from(today);
//!
//!     let outcome = repo
//!         .create_series(
//!             "me",
//!             NewTaskData {
//!                 title: "Water the plants".to_string(),
//!                 ..Default::default()
//!             },
//!             rule,
//!             window,
//!         )
//!         .await?;
//!     println!(
//!         "series {} materialized {} occurrences",
//!         outcome.series_id, outcome.occurrence_count
//!     );
//!     Ok(())
//! }
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod timeline;
