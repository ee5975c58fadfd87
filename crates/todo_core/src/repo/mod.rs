//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value slot contract used by the store.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Slot values are opaque text; the repository never parses them.

pub mod slot_repo;
