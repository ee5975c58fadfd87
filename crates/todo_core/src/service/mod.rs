//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory todo state and orchestrate slot persistence.
//! - Keep UI layers decoupled from storage details.

pub mod todo_store;
