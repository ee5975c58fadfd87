//! Todo collection store.
//!
//! # Responsibility
//! - Own the ordered todo collection and the current view filter.
//! - Apply add/toggle/delete/edit/clear mutations and persist after each one.
//! - Restore the collection from the persisted slot on load.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - Titles are trimmed and never empty for a live todo.
//! - New todos are prepended; no operation reorders existing todos.
//! - No operation surfaces an error. Bad input, unknown ids and storage
//!   failures degrade to no-ops or an empty collection, and are logged.
//! - The filter is never persisted and resets to `All` on load.

use crate::model::filter::Filter;
use crate::model::todo::{Todo, TodoId};
use crate::repo::slot_repo::SlotRepository;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Slot key holding the serialized todo collection.
pub const TODOS_SLOT_KEY: &str = "todos.v1";

/// Owned todo state backed by a durable key-value slot.
///
/// The UI layer holds one instance, calls mutations in response to input and
/// re-reads [`TodoStore::visible_todos`] and [`TodoStore::remaining_count`]
/// to redraw.
pub struct TodoStore<R: SlotRepository> {
    repo: R,
    todos: Vec<Todo>,
    filter: Filter,
}

impl<R: SlotRepository> TodoStore<R> {
    /// Creates a store restored from the persisted slot.
    ///
    /// Missing, unreadable or corrupt data yields an empty collection.
    pub fn load(repo: R) -> Self {
        let todos = read_slot(&repo);
        Self {
            repo,
            todos,
            filter: Filter::All,
        }
    }

    /// Discards in-memory state and restores it from the slot again.
    ///
    /// The filter resets to `All`, as on a fresh load.
    pub fn reload(&mut self) {
        self.todos = read_slot(&self.repo);
        self.filter = Filter::All;
    }

    /// Prepends a new incomplete todo and persists.
    ///
    /// Returns the new id, or `None` when the trimmed title is empty, in which
    /// case nothing changes and nothing is written.
    pub fn add(&mut self, title: &str) -> Option<TodoId> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            debug!("event=todo_add module=store status=ignored reason=empty_title");
            return None;
        }

        let mut todo = Todo::new(trimmed);
        while self.get(&todo.id).is_some() {
            todo = Todo::new(trimmed);
        }
        let id = todo.id.clone();
        self.todos.insert(0, todo);
        info!(
            "event=todo_add module=store status=ok todo_id={} count={}",
            id,
            self.todos.len()
        );
        self.save();
        Some(id)
    }

    /// Flips the completed flag of the matching todo and persists.
    pub fn toggle(&mut self, id: &str) {
        match self.todos.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                info!(
                    "event=todo_toggle module=store status=ok todo_id={} completed={}",
                    id, todo.completed
                );
            }
            None => debug!("event=todo_toggle module=store status=ignored reason=not_found"),
        }
        self.save();
    }

    /// Removes the matching todo and persists.
    pub fn delete(&mut self, id: &str) {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() < before {
            info!("event=todo_delete module=store status=ok todo_id={id}");
        } else {
            debug!("event=todo_delete module=store status=ignored reason=not_found");
        }
        self.save();
    }

    /// Replaces the title of the matching todo and persists.
    ///
    /// An empty trimmed title deletes the todo instead. `completed` and
    /// `created_at` are left untouched.
    pub fn edit(&mut self, id: &str, new_title: &str) {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            self.delete(id);
            return;
        }

        match self.todos.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.title = trimmed.to_string();
                info!("event=todo_edit module=store status=ok todo_id={id}");
            }
            None => debug!("event=todo_edit module=store status=ignored reason=not_found"),
        }
        self.save();
    }

    /// Removes every completed todo, keeping the rest in order, and persists.
    pub fn clear_completed(&mut self) {
        let before = self.todos.len();
        self.todos.retain(Todo::is_active);
        info!(
            "event=todo_clear_completed module=store status=ok removed={} count={}",
            before - self.todos.len(),
            self.todos.len()
        );
        self.save();
    }

    /// Replaces the current view filter. Nothing is persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Todos matching the current filter, in collection order.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .collect()
    }

    /// Number of incomplete todos, regardless of the current filter.
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_active()).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.remaining_count()
    }

    /// Full collection in order, ignoring the filter.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Serializes the collection exactly as [`TodoStore::save`] writes it.
    ///
    /// # Errors
    /// Returns the encoder error; with the current model this does not occur
    /// in practice.
    pub fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.todos)
    }

    /// Writes the collection to the todo slot.
    ///
    /// Failures are logged and swallowed; in-memory state stays authoritative.
    pub fn save(&self) {
        let payload = match self.snapshot() {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    "event=todo_save module=store status=error error_code=snapshot_encode_failed error={err}"
                );
                return;
            }
        };

        match self.repo.put_slot(TODOS_SLOT_KEY, &payload) {
            Ok(()) => debug!(
                "event=todo_save module=store status=ok count={} bytes={}",
                self.todos.len(),
                payload.len()
            ),
            Err(err) => warn!(
                "event=todo_save module=store status=error error_code=slot_write_failed error={err}"
            ),
        }
    }
}

/// Parses a persisted snapshot into a normalized collection.
///
/// Rules:
/// - invalid JSON or a non-array document yields an empty collection;
/// - an element that does not decode as a todo is dropped, its siblings kept;
/// - titles are trimmed;
/// - entries with a blank id or title are dropped;
/// - later duplicates of an already seen id are dropped.
pub fn decode_snapshot(raw: &str) -> Vec<Todo> {
    let elements: Vec<Value> = match serde_json::from_str(raw) {
        Ok(elements) => elements,
        Err(err) => {
            warn!(
                "event=todo_load module=store status=error error_code=snapshot_parse_failed line={} column={}",
                err.line(),
                err.column()
            );
            return Vec::new();
        }
    };

    let total = elements.len();
    let mut seen = HashSet::with_capacity(total);
    let mut todos = Vec::with_capacity(total);
    for (index, element) in elements.into_iter().enumerate() {
        let mut todo = match serde_json::from_value::<Todo>(element) {
            Ok(todo) => todo,
            Err(err) => {
                // serde messages can echo field values; log the category only.
                debug!(
                    "event=todo_load module=store status=skipped index={index} error_code=element_decode_failed category={:?}",
                    err.classify()
                );
                continue;
            }
        };
        todo.title = todo.title.trim().to_string();
        if todo.validate().is_err() || !seen.insert(todo.id.clone()) {
            continue;
        }
        todos.push(todo);
    }

    if todos.len() < total {
        warn!(
            "event=todo_load module=store status=partial dropped={} kept={}",
            total - todos.len(),
            todos.len()
        );
    }
    todos
}

fn read_slot<R: SlotRepository>(repo: &R) -> Vec<Todo> {
    match repo.get_slot(TODOS_SLOT_KEY) {
        Ok(Some(raw)) => {
            let todos = decode_snapshot(&raw);
            info!(
                "event=todo_load module=store status=ok count={}",
                todos.len()
            );
            todos
        }
        Ok(None) => {
            info!("event=todo_load module=store status=ok count=0 reason=empty_slot");
            Vec::new()
        }
        Err(err) => {
            warn!(
                "event=todo_load module=store status=error error_code=slot_read_failed error={err}"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::decode_snapshot;

    #[test]
    fn decode_snapshot_returns_empty_for_invalid_json() {
        assert!(decode_snapshot("{not json").is_empty());
        assert!(decode_snapshot("").is_empty());
    }

    #[test]
    fn decode_snapshot_returns_empty_for_non_array_document() {
        assert!(decode_snapshot(r#"{"id":"a","title":"x"}"#).is_empty());
        assert!(decode_snapshot("null").is_empty());
    }

    #[test]
    fn decode_snapshot_drops_undecodable_elements_and_keeps_siblings() {
        let raw = r#"[
            {"id":"a","title":"keep me"},
            {"id":"b","completed":true},
            {"id":"c","title":"both","text":"fields"},
            {"id":"d","title":"bad flag","completed":"yes"},
            7,
            {"id":"e","title":"also kept","completed":true}
        ]"#;
        let todos = decode_snapshot(raw);
        let ids: Vec<&str> = todos.iter().map(|todo| todo.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
    }

    #[test]
    fn decode_snapshot_accepts_fractional_created_at() {
        let raw = r#"[{"id":"a","title":"x","completed":false,"createdAt":1700000000000.0}]"#;
        let todos = decode_snapshot(raw);
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].created_at, Some(1_700_000_000_000));
    }

    #[test]
    fn decode_snapshot_trims_titles_and_drops_blank_entries() {
        let raw = r#"[
            {"id":"a","title":"  padded  ","completed":true},
            {"id":"b","title":"   "},
            {"id":"","title":"orphan"},
            {"id":"c","text":"legacy text field"}
        ]"#;
        let todos = decode_snapshot(raw);
        let summary: Vec<(&str, &str, bool)> = todos
            .iter()
            .map(|todo| (todo.id.as_str(), todo.title.as_str(), todo.completed))
            .collect();
        assert_eq!(
            summary,
            vec![("a", "padded", true), ("c", "legacy text field", false)]
        );
    }

    #[test]
    fn decode_snapshot_keeps_first_occurrence_of_duplicate_ids() {
        let raw = r#"[{"id":"a","title":"first"},{"id":"a","title":"second"}]"#;
        let todos = decode_snapshot(raw);
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "first");
    }
}
