use clap::{Parser, Subcommand};

/// Personal task dashboard: one-off and weekly recurring tasks with a
/// collision-free day timeline
#[derive(Parser, Debug)]
#[command(name = "allme", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a task, or a recurring series with --on
    Add(AddCommand),
    /// List visible tasks, optionally for a date range
    List(ListCommand),
    /// Show one day as a timeline
    Day(DayCommand),
    /// Mark a task (or its whole series) as done
    Done(DoneCommand),
    /// Delete a task (or its whole series)
    Delete(DeleteCommand),
    /// Materialize further occurrences for a recurring series
    Extend(ExtendCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The task title
    pub title: String,
    /// Longer description
    #[clap(short, long)]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD); for a series this is the first possible date
    #[clap(long)]
    pub due: Option<String>,
    /// Start time of day (HH:MM)
    #[clap(long)]
    pub start: Option<String>,
    /// End time of day (HH:MM), must be after --start
    #[clap(long, requires = "start")]
    pub end: Option<String>,
    /// Priority (low, medium, high)
    #[clap(short, long)]
    pub priority: Option<String>,
    /// Weekdays to repeat on (e.g. "mon,wed,fri", "weekdays", "daily");
    /// turns the task into a recurring series
    #[clap(long)]
    pub on: Option<String>,
    /// Last date the series may generate occurrences for (YYYY-MM-DD)
    #[clap(long, requires = "on")]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Start of the date range (YYYY-MM-DD)
    #[clap(long, requires = "to")]
    pub from: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    #[clap(long, requires = "from")]
    pub to: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DayCommand {
    /// The day to show (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// Task ID (full UUID or unique prefix)
    pub id: String,
    /// Complete every occurrence of the task's series
    #[clap(long)]
    pub series: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// Task ID (full UUID or unique prefix)
    pub id: String,
    /// Delete the whole series the task belongs to
    #[clap(long)]
    pub series: bool,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtendCommand {
    /// Task ID of any occurrence in the series (full UUID or unique prefix)
    pub id: String,
    /// How many days ahead to materialize (defaults to the configured
    /// horizon)
    #[clap(long)]
    pub days: Option<u32>,
}
