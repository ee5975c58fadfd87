//! Terminal front-end for the todo store.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the slot database.
//! - Hold one `TodoStore`, apply the requested action and redraw the view.

mod actions;
mod cli;
mod config;
mod render;
mod shell;

use actions::{apply, Action};
use clap::Parser;
use cli::{Cli, Command};
use config::CliConfig;
use log::{error, info};
use render::render_view;
use std::error::Error;
use std::process::ExitCode;
use todo_core::db::open_db;
use todo_core::{init_logging, SqliteSlotRepository, TodoStore};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::resolve(&cli);

    // Logging is diagnostics only; the list still works without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match run(&cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command, config: &CliConfig) -> Result<(), Box<dyn Error>> {
    if *command == Command::Version {
        println!("todo_core version={}", todo_core::core_version());
        return Ok(());
    }

    info!(
        "event=cli_run module=cli status=start db_path={}",
        config.db_path.display()
    );
    let conn = open_db(&config.db_path)?;
    let mut store = TodoStore::load(SqliteSlotRepository::new(&conn));

    match Action::from_command(command) {
        Some(Action::SetFilter(filter)) => {
            store.set_filter(filter);
            print!("{}", render_view(&store));
        }
        Some(action) => {
            println!("{}", apply(&mut store, &action));
            print!("{}", render_view(&store));
        }
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            shell::run_shell(&mut store, stdin.lock(), stdout.lock())?;
        }
    }
    Ok(())
}
