//! Day-timeline layout.
//!
//! Given the timed tasks of one calendar day, [`layout`] groups tasks whose
//! intervals transitively overlap and hands each a column index and column
//! count, so a renderer can place them side by side without collision
//! (`width = 100% / column_count`, `left = column * width`).
//!
//! Grouping chains on a running maximum end rather than pairwise overlap:
//! with A 09:00–10:00, B 09:30–09:45 and C 09:50–11:00, A and C never touch
//! but B bridges them, and C must not land in A's column. A group only
//! closes once a task starts at or after everything seen so far has ended.

use uuid::Uuid;

use crate::models::Task;

/// Synthesized duration for a task with a start but no end time.
pub const DEFAULT_DURATION_MINUTES: u16 = 60;

/// Exclusive upper bound of a day in minutes.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A timed task reduced to its interval, in minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEntry {
    pub id: Uuid,
    pub start_minute: u16,
    pub end_minute: u16,
}

/// A timed task with its assigned column geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub id: Uuid,
    /// 0-indexed column within the overlap group, by arrival order.
    pub column: usize,
    /// Number of columns in the overlap group.
    pub column_count: usize,
    pub start_minute: u16,
    pub end_minute: u16,
}

/// Assigns columns to timed entries so overlapping ones never share one.
///
/// Entries are swept in ascending `start_minute` order (stable on ties, so
/// layout is deterministic across re-renders). The reported intervals are
/// the true ones; minimum visual heights for very short tasks are the
/// renderer's concern.
pub fn layout(entries: &[TimedEntry]) -> Vec<LayoutEntry> {
    let mut order: Vec<&TimedEntry> = entries.iter().collect();
    order.sort_by_key(|entry| entry.start_minute);

    let mut out = Vec::with_capacity(entries.len());
    let mut group: Vec<&TimedEntry> = Vec::new();
    let mut group_end = 0u16;

    for entry in order {
        if !group.is_empty() && entry.start_minute >= group_end {
            flush_group(&group, &mut out);
            group.clear();
        }
        group_end = if group.is_empty() {
            entry.end_minute
        } else {
            group_end.max(entry.end_minute)
        };
        group.push(entry);
    }
    flush_group(&group, &mut out);

    out
}

fn flush_group(group: &[&TimedEntry], out: &mut Vec<LayoutEntry>) {
    for (column, entry) in group.iter().enumerate() {
        out.push(LayoutEntry {
            id: entry.id,
            column,
            column_count: group.len(),
            start_minute: entry.start_minute,
            end_minute: entry.end_minute,
        });
    }
}

/// One day's tasks split for rendering: laid-out timed entries plus the
/// ids of untimed tasks, which render as a flat all-day list.
#[derive(Debug, Clone, Default)]
pub struct DaySchedule {
    pub timed: Vec<LayoutEntry>,
    pub all_day: Vec<Uuid>,
}

impl DaySchedule {
    /// Builds the schedule for the tasks due on one date.
    ///
    /// Tasks without a start time go to the all-day list. A task with a
    /// start but no end gets the default one-hour duration, clamped to
    /// midnight.
    pub fn build(tasks: &[Task]) -> Self {
        let mut timed = Vec::new();
        let mut all_day = Vec::new();

        for task in tasks {
            match task.start_time {
                Some(start) => {
                    let start_minute = start.minutes_from_midnight();
                    let end_minute = match task.end_time {
                        Some(end) => end.minutes_from_midnight(),
                        None => (start_minute + DEFAULT_DURATION_MINUTES).min(MINUTES_PER_DAY),
                    };
                    timed.push(TimedEntry {
                        id: task.id,
                        start_minute,
                        end_minute,
                    });
                }
                None => all_day.push(task.id),
            }
        }

        DaySchedule {
            timed: layout(&timed),
            all_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(start: u16, end: u16) -> TimedEntry {
        TimedEntry {
            id: Uuid::now_v7(),
            start_minute: start,
            end_minute: end,
        }
    }

    fn find(out: &[LayoutEntry], id: Uuid) -> &LayoutEntry {
        out.iter().find(|e| e.id == id).unwrap()
    }

    #[test]
    fn isolated_task_gets_single_column() {
        let entries = vec![entry(540, 600)];
        let out = layout(&entries);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].column, 0);
        assert_eq!(out[0].column_count, 1);
    }

    #[test]
    fn disjoint_tasks_each_get_their_own_group() {
        let entries = vec![entry(540, 600), entry(600, 660), entry(700, 720)];
        let out = layout(&entries);
        assert_eq!(out.len(), 3);
        for laid in &out {
            assert_eq!(laid.column, 0);
            assert_eq!(laid.column_count, 1);
        }
    }

    #[test]
    fn bridged_tasks_share_one_group() {
        // A 09:00-10:00, B 09:30-09:45, C 09:50-11:00: A and C never
        // intersect directly but must still not share a column.
        let a = entry(540, 600);
        let b = entry(570, 585);
        let c = entry(590, 660);
        let out = layout(&[a.clone(), b.clone(), c.clone()]);

        for laid in &out {
            assert_eq!(laid.column_count, 3);
        }
        assert_eq!(find(&out, a.id).column, 0);
        assert_eq!(find(&out, b.id).column, 1);
        assert_eq!(find(&out, c.id).column, 2);
    }

    #[test]
    fn group_closes_when_running_max_is_cleared() {
        // B ends before A does; C starts after both: two groups.
        let a = entry(540, 600);
        let b = entry(550, 560);
        let c = entry(600, 630);
        let out = layout(&[a.clone(), b.clone(), c.clone()]);

        assert_eq!(find(&out, a.id).column_count, 2);
        assert_eq!(find(&out, b.id).column_count, 2);
        assert_eq!(find(&out, c.id).column_count, 1);
        assert_eq!(find(&out, c.id).column, 0);
    }

    #[test]
    fn simultaneous_starts_keep_input_order() {
        let a = entry(540, 600);
        let b = entry(540, 570);
        let out = layout(&[a.clone(), b.clone()]);
        assert_eq!(find(&out, a.id).column, 0);
        assert_eq!(find(&out, b.id).column, 1);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(layout(&[]).is_empty());
    }

    #[test]
    fn zero_duration_task_is_reported_as_is() {
        let a = entry(540, 540);
        let out = layout(&[a.clone()]);
        assert_eq!(out[0].start_minute, 540);
        assert_eq!(out[0].end_minute, 540);
    }

    proptest! {
        #[test]
        fn same_column_entries_never_overlap(
            raw in proptest::collection::vec((0u16..MINUTES_PER_DAY, 1u16..180), 0..24)
        ) {
            let entries: Vec<TimedEntry> = raw
                .into_iter()
                .map(|(start, len)| entry(start, (start + len).min(MINUTES_PER_DAY)))
                .collect();
            let out = layout(&entries);

            prop_assert_eq!(out.len(), entries.len());
            for a in &out {
                for b in &out {
                    if a.id == b.id || a.column != b.column {
                        continue;
                    }
                    // Half-open interval comparison.
                    let overlaps = a.start_minute < b.end_minute && b.start_minute < a.end_minute;
                    prop_assert!(!overlaps, "column {} holds overlapping entries", a.column);
                }
            }
        }
    }

    mod day_schedule {
        use super::*;
        use crate::models::{Task, TaskPriority, TaskStatus};
        use chrono::Utc;

        fn task(start: Option<&str>, end: Option<&str>) -> Task {
            Task {
                id: Uuid::now_v7(),
                owner_id: "owner".to_string(),
                title: "t".to_string(),
                description: None,
                due_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 5),
                start_time: start.map(|s| s.parse().unwrap()),
                end_time: end.map(|s| s.parse().unwrap()),
                is_recurring: false,
                recurrence_days: None,
                recurrence_end_date: None,
                series_id: None,
                priority: TaskPriority::Medium,
                status: TaskStatus::Todo,
                completed_at: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        }

        #[test]
        fn untimed_tasks_go_to_all_day() {
            let tasks = vec![task(None, None), task(Some("09:00"), Some("10:00"))];
            let schedule = DaySchedule::build(&tasks);
            assert_eq!(schedule.all_day, vec![tasks[0].id]);
            assert_eq!(schedule.timed.len(), 1);
        }

        #[test]
        fn missing_end_defaults_to_one_hour() {
            let tasks = vec![task(Some("09:30"), None)];
            let schedule = DaySchedule::build(&tasks);
            assert_eq!(schedule.timed[0].start_minute, 570);
            assert_eq!(schedule.timed[0].end_minute, 630);
        }

        #[test]
        fn late_start_clamps_to_midnight() {
            let tasks = vec![task(Some("23:30"), None)];
            let schedule = DaySchedule::build(&tasks);
            assert_eq!(schedule.timed[0].end_minute, MINUTES_PER_DAY);
        }

        #[test]
        fn overlapping_day_tasks_get_columns() {
            let tasks = vec![
                task(Some("09:00"), Some("10:00")),
                task(Some("09:30"), Some("09:45")),
            ];
            let schedule = DaySchedule::build(&tasks);
            assert!(schedule.timed.iter().all(|e| e.column_count == 2));
        }
    }
}
