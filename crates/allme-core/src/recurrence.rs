//! Weekly recurrence expansion.
//!
//! A [`RecurrenceRule`] is deliberately small: a weekday set, the date the
//! rule starts applying, and an optional end date. No monthly or yearly
//! patterns, no interval arithmetic. Expansion turns the rule into the
//! concrete dates inside a bounded [`GenerationWindow`], and the repository
//! persists one occurrence row per date.
//!
//! The window is the caller's responsibility and is deliberately capped:
//! however far `until` reaches, only `horizon_days` worth of occurrences
//! are materialized per invocation. A series that outlives its window is
//! topped up later by re-running generation over an extended window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{DateRange, Weekday, WeekdaySet};

/// A weekly repeat rule: which weekdays, starting when, ending when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Weekdays the task repeats on. Never empty for a stored rule.
    pub weekdays: WeekdaySet,
    /// First date the rule applies; earlier window days are skipped.
    pub origin: NaiveDate,
    /// Optional last date occurrences may fall on.
    pub until: Option<NaiveDate>,
}

/// Inclusive date window occurrences are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl GenerationWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        GenerationWindow { start, end }
    }

    /// The standard forward window: `horizon_days` days starting today.
    pub fn forward(today: NaiveDate, horizon_days: u32) -> Self {
        GenerationWindow {
            start: today,
            end: today + chrono::Duration::days(i64::from(horizon_days)),
        }
    }
}

/// How far ahead occurrences are materialized per generation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializationConfig {
    /// Forward generation horizon in days.
    pub horizon_days: u32,
}

impl Default for MaterializationConfig {
    fn default() -> Self {
        Self { horizon_days: 90 }
    }
}

impl MaterializationConfig {
    pub fn window_from(&self, today: NaiveDate) -> GenerationWindow {
        GenerationWindow::forward(today, self.horizon_days)
    }
}

/// Expands a rule into the ascending list of occurrence dates inside a
/// window.
///
/// The effective range is `[max(origin, window.start),
/// min(until, window.end)]`; an inverted range yields no dates. Every
/// returned date falls on a weekday in the rule's set.
pub fn expand(rule: &RecurrenceRule, window: GenerationWindow) -> Vec<NaiveDate> {
    let start = rule.origin.max(window.start);
    let end = match rule.until {
        Some(until) => until.min(window.end),
        None => window.end,
    };

    DateRange::new(start, end)
        .filter(|date| rule.weekdays.contains(Weekday::from_date(*date)))
        .collect()
}
