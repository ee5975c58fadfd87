//! Text rendering of the current store view.

use crate::actions::short_id;
use std::fmt::Write;
use todo_core::{SlotRepository, TodoStore};

/// Renders the filtered list followed by a status footer.
pub fn render_view<R: SlotRepository>(store: &TodoStore<R>) -> String {
    let mut out = String::new();
    let visible = store.visible_todos();
    if visible.is_empty() {
        out.push_str("No tasks\n");
    }
    for todo in visible {
        let mark = if todo.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {:<8} {}", short_id(&todo.id), todo.title);
    }
    let _ = writeln!(
        out,
        "{} items left | filter: {}",
        store.remaining_count(),
        store.filter()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::render_view;
    use todo_core::db::open_db_in_memory;
    use todo_core::{Filter, SlotRepository, SqliteSlotRepository, TodoStore, TODOS_SLOT_KEY};

    #[test]
    fn render_lists_visible_todos_with_footer() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        repo.put_slot(
            TODOS_SLOT_KEY,
            r#"[
                {"id":"walk","title":"Walk dog","completed":false},
                {"id":"milk","title":"Buy milk","completed":true}
            ]"#,
        )
        .unwrap();
        let mut store = TodoStore::load(repo);

        assert_eq!(
            render_view(&store),
            "[ ] walk     Walk dog\n[x] milk     Buy milk\n1 items left | filter: all\n"
        );

        store.set_filter(Filter::Completed);
        assert_eq!(
            render_view(&store),
            "[x] milk     Buy milk\n1 items left | filter: completed\n"
        );
    }

    #[test]
    fn render_empty_view_says_no_tasks() {
        let conn = open_db_in_memory().unwrap();
        let store = TodoStore::load(SqliteSlotRepository::new(&conn));

        assert_eq!(render_view(&store), "No tasks\n0 items left | filter: all\n");
    }
}
