use allme_core::date::format_date;
use allme_core::models::{Task, TaskPriority, TaskStatus};
use comfy_table::{Attribute, Cell, Color, Row, Table};

use crate::util::short_id;

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Due", "Time", "Priority", "Status"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(task.id)));

        let mut title = String::new();
        if task.series_id.is_some() {
            title.push('↻');
            title.push(' ');
        }
        title.push_str(&task.title);

        let mut title_cell = Cell::new(title);
        title_cell = match task.status {
            TaskStatus::Done => title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey),
            _ => match task.priority {
                TaskPriority::High => title_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                TaskPriority::Medium => title_cell.fg(Color::Yellow),
                TaskPriority::Low => title_cell,
            },
        };
        row.add_cell(title_cell);

        row.add_cell(Cell::new(
            task.due_date.map(format_date).unwrap_or_default(),
        ));
        row.add_cell(Cell::new(time_span(task)));
        row.add_cell(Cell::new(task.priority.to_string()));
        row.add_cell(Cell::new(task.status.to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

fn time_span(task: &Task) -> String {
    match (task.start_time, task.end_time) {
        (Some(start), Some(end)) => format!("{}-{}", start, end),
        (Some(start), None) => start.to_string(),
        _ => String::new(),
    }
}
