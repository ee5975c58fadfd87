//! Front-end configuration resolution.
//!
//! Precedence per setting: command-line flag, then environment variable,
//! then a default under the system temp directory.

use crate::cli::Cli;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
pub const LOG_DIR_ENV: &str = "TODO_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TODO_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "todo_store.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "todo_logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Resolves settings from parsed flags and the process environment.
    pub fn resolve(cli: &Cli) -> Self {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    fn resolve_with(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Self {
        let env_value = |key: &str| {
            env(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = cli
            .db
            .clone()
            .or_else(|| env_value(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = cli
            .log_dir
            .clone()
            .or_else(|| env_value(LOG_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        let log_level = cli
            .log_level
            .clone()
            .or_else(|| env_value(LOG_LEVEL_ENV))
            .unwrap_or_else(|| todo_core::default_log_level().to_string());

        Self {
            db_path,
            log_dir,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::cli::Cli;
    use clap::Parser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn flags_win_over_environment() {
        let cli = Cli::try_parse_from([
            "todo",
            "--db",
            "/flag/todo.db",
            "--log-level",
            "warn",
            "list",
        ])
        .unwrap();
        let config = CliConfig::resolve_with(
            &cli,
            env_from(&[(DB_PATH_ENV, "/env/todo.db"), (LOG_LEVEL_ENV, "trace")]),
        );
        assert_eq!(config.db_path, PathBuf::from("/flag/todo.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn environment_wins_over_defaults_and_blank_values_are_ignored() {
        let cli = Cli::try_parse_from(["todo", "list"]).unwrap();
        let config = CliConfig::resolve_with(
            &cli,
            env_from(&[(LOG_DIR_ENV, " /env/logs "), (DB_PATH_ENV, "   ")]),
        );
        assert_eq!(config.log_dir, PathBuf::from("/env/logs"));
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("todo_store.sqlite3")
        );
        assert_eq!(config.log_level, todo_core::default_log_level());
    }
}
