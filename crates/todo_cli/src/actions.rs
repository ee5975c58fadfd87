//! User actions shared by one-shot commands and the interactive shell.

use crate::cli::Command;
use todo_core::{Filter, SlotRepository, TodoStore};

/// One user intent mapped onto a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Toggle(String),
    Delete(String),
    Edit(String, String),
    ClearCompleted,
    SetFilter(Filter),
}

impl Action {
    /// Maps a store-touching subcommand; `None` for `shell` and `version`.
    pub fn from_command(command: &Command) -> Option<Self> {
        let action = match command {
            Command::Add { title } => Self::Add(title.join(" ")),
            Command::Toggle { id } => Self::Toggle(id.clone()),
            Command::Delete { id } => Self::Delete(id.clone()),
            Command::Edit { id, title } => Self::Edit(id.clone(), title.join(" ")),
            Command::ClearCompleted => Self::ClearCompleted,
            Command::List { filter } => Self::SetFilter(*filter),
            Command::Shell | Command::Version => return None,
        };
        Some(action)
    }
}

/// Applies `action` and returns a one-line status for the user.
///
/// Ids may be abbreviated to any unique prefix.
pub fn apply<R: SlotRepository>(store: &mut TodoStore<R>, action: &Action) -> String {
    match action {
        Action::Add(title) => match store.add(title) {
            Some(id) => format!("added {}", short_id(&id)),
            None => "nothing to add".to_string(),
        },
        Action::Toggle(input) => match resolve_id(store, input) {
            Some(id) => {
                store.toggle(&id);
                let state = match store.get(&id) {
                    Some(todo) if todo.completed => "completed",
                    _ => "active",
                };
                format!("marked {} {state}", short_id(&id))
            }
            None => no_match(input),
        },
        Action::Delete(input) => match resolve_id(store, input) {
            Some(id) => {
                store.delete(&id);
                format!("deleted {}", short_id(&id))
            }
            None => no_match(input),
        },
        Action::Edit(input, title) => match resolve_id(store, input) {
            Some(id) => {
                store.edit(&id, title);
                if store.get(&id).is_some() {
                    format!("edited {}", short_id(&id))
                } else {
                    format!("deleted {}", short_id(&id))
                }
            }
            None => no_match(input),
        },
        Action::ClearCompleted => {
            let completed = store.completed_count();
            store.clear_completed();
            format!("cleared {completed} completed")
        }
        Action::SetFilter(filter) => {
            store.set_filter(*filter);
            format!("showing {filter}")
        }
    }
}

/// Finds the todo id matching `input` exactly or as a unique prefix.
pub fn resolve_id<R: SlotRepository>(store: &TodoStore<R>, input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(todo) = store.get(input) {
        return Some(todo.id.clone());
    }

    let mut matches = store
        .todos()
        .iter()
        .filter(|todo| todo.id.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(todo), None) => Some(todo.id.clone()),
        _ => None,
    }
}

/// Display form of an id: its first 8 characters.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn no_match(input: &str) -> String {
    format!("no todo matches `{}`", input.trim())
}

#[cfg(test)]
mod tests {
    use super::{apply, resolve_id, short_id, Action};
    use todo_core::db::open_db_in_memory;
    use todo_core::{Filter, SlotRepository, SqliteSlotRepository, TodoStore, TODOS_SLOT_KEY};

    fn seeded(repo: SqliteSlotRepository<'_>) -> TodoStore<SqliteSlotRepository<'_>> {
        repo.put_slot(
            TODOS_SLOT_KEY,
            r#"[
                {"id":"abc-1","title":"first","completed":false},
                {"id":"abd-2","title":"second","completed":true}
            ]"#,
        )
        .unwrap();
        TodoStore::load(repo)
    }

    #[test]
    fn resolve_id_accepts_exact_and_unique_prefix() {
        let conn = open_db_in_memory().unwrap();
        let store = seeded(SqliteSlotRepository::new(&conn));

        assert_eq!(resolve_id(&store, "abc-1").as_deref(), Some("abc-1"));
        assert_eq!(resolve_id(&store, "abd").as_deref(), Some("abd-2"));
        assert_eq!(resolve_id(&store, "ab"), None);
        assert_eq!(resolve_id(&store, "zzz"), None);
        assert_eq!(resolve_id(&store, "  "), None);
    }

    #[test]
    fn apply_reports_outcomes() {
        let conn = open_db_in_memory().unwrap();
        let mut store = seeded(SqliteSlotRepository::new(&conn));

        assert_eq!(
            apply(&mut store, &Action::Toggle("abc".to_string())),
            "marked abc-1 completed"
        );
        assert_eq!(
            apply(&mut store, &Action::Edit("abd".to_string(), "  ".to_string())),
            "deleted abd-2"
        );
        assert_eq!(
            apply(&mut store, &Action::Delete("nope".to_string())),
            "no todo matches `nope`"
        );
        assert_eq!(
            apply(&mut store, &Action::Add("   ".to_string())),
            "nothing to add"
        );
        assert_eq!(
            apply(&mut store, &Action::ClearCompleted),
            "cleared 1 completed"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn set_filter_changes_view_only() {
        let conn = open_db_in_memory().unwrap();
        let mut store = seeded(SqliteSlotRepository::new(&conn));

        assert_eq!(
            apply(&mut store, &Action::SetFilter(Filter::Active)),
            "showing active"
        );
        assert_eq!(store.visible_todos().len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn short_id_truncates_long_ids_only() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
