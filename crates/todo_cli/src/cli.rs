use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::Filter;

/// Command line arguments for the todo front-end.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Manage a local todo list")]
#[command(version)]
pub struct Cli {
    /// SQLite file holding the todo slot
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, value_name = "PATH", global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a todo at the top of the list
    Add {
        #[arg(required = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Flip a todo between active and completed
    Toggle { id: String },
    /// Remove a todo
    Delete { id: String },
    /// Replace a todo title; an empty title deletes the todo
    Edit {
        id: String,
        #[arg(allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Remove every completed todo
    ClearCompleted,
    /// Print the list
    List {
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Interactive session reading commands from stdin
    Shell,
    /// Print the core library version
    Version,
}
