use allme_core::db;
use allme_core::error::CoreError;
use allme_core::repository::SqliteRepository;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ALLME_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::load().unwrap_or_default();

    let pool = match db::establish_connection(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => {
            commands::add::add_task(&repository, &config, command).await
        }
        cli::Commands::List(command) => {
            commands::list::list_tasks(&repository, &config, command).await
        }
        cli::Commands::Day(command) => {
            commands::day::day_view(&repository, &config, command).await
        }
        cli::Commands::Done(command) => {
            commands::done::done_task(&repository, &config, command).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&repository, &config, command).await
        }
        cli::Commands::Extend(command) => {
            commands::extend::extend_series(&repository, &config, command).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Task not found: {}", "Error:".style(error_style), s);
            }
            CoreError::Validation(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s.yellow());
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
