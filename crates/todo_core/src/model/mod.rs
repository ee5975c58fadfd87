//! Domain model for the todo list.
//!
//! # Responsibility
//! - Define the todo record persisted in the slot payload.
//! - Define the view filter used to project the collection.
//!
//! # Invariants
//! - Every todo is identified by a stable, unique `TodoId`.
//! - A todo present in the collection never has an empty trimmed title.

pub mod filter;
pub mod todo;
