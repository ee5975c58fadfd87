//! Core state and persistence for the todo list.
//!
//! The UI layer owns one [`TodoStore`], drives it with user actions and
//! redraws from its filtered view. Everything else here supports that store:
//! the record model, the SQLite-backed key-value slot and logging bootstrap.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{Filter, FilterParseError};
pub use model::todo::{Todo, TodoId, TodoValidationError};
pub use repo::slot_repo::{RepoError, RepoResult, SlotRepository, SqliteSlotRepository};
pub use service::todo_store::{decode_snapshot, TodoStore, TODOS_SLOT_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
