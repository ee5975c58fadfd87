//! Interactive line-based session.
//!
//! # Responsibility
//! - Parse one command per input line and apply it to a single store.
//! - Redraw the view after every command, as a UI layer would.
//!
//! # Invariants
//! - The filter lives only for the session; it is never persisted.
//! - Parse errors are reported and the session continues.

use crate::actions::{apply, Action};
use crate::render::render_view;
use std::io::{self, BufRead, Write};
use todo_core::{Filter, SlotRepository, TodoStore};

const PROMPT: &str = "> ";
const HELP: &str = "\
commands:
  add <title>          add a todo at the top
  toggle <id>          flip completed
  delete <id>          remove a todo
  edit <id> [title]    replace title; empty deletes
  clear                remove completed todos
  filter <all|active|completed>
  list                 redraw
  help                 this text
  quit                 leave the session
ids may be shortened to any unique prefix";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Apply(Action),
    List,
    Help,
    Quit,
}

/// Parses one input line; `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" | "a" => ShellCommand::Apply(Action::Add(rest.to_string())),
        "toggle" | "t" => ShellCommand::Apply(Action::Toggle(required_id(verb, rest)?)),
        "delete" | "rm" => ShellCommand::Apply(Action::Delete(required_id(verb, rest)?)),
        "edit" | "e" => {
            let (id, title) = match rest.split_once(char::is_whitespace) {
                Some((id, title)) => (id, title),
                None => (rest, ""),
            };
            ShellCommand::Apply(Action::Edit(required_id(verb, id)?, title.to_string()))
        }
        "clear" | "clear-completed" => ShellCommand::Apply(Action::ClearCompleted),
        "filter" | "f" => {
            let filter = rest.parse::<Filter>().map_err(|err| err.to_string())?;
            ShellCommand::Apply(Action::SetFilter(filter))
        }
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

/// Runs the session until `quit` or end of input.
///
/// # Errors
/// Returns I/O errors from reading `input` or writing `output`.
pub fn run_shell<R, I, O>(store: &mut TodoStore<R>, input: I, mut output: O) -> io::Result<()>
where
    R: SlotRepository,
    I: BufRead,
    O: Write,
{
    write!(output, "{}", render_view(store))?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        match parse_line(&line?) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => writeln!(output, "{HELP}")?,
            Ok(Some(ShellCommand::List)) => write!(output, "{}", render_view(store))?,
            Ok(Some(ShellCommand::Apply(action))) => {
                let status = apply(store, &action);
                writeln!(output, "{status}")?;
                write!(output, "{}", render_view(store))?;
            }
            Err(message) => writeln!(output, "error: {message}")?,
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

fn required_id(verb: &str, value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("`{verb}` needs a todo id"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_line, run_shell, ShellCommand};
    use crate::actions::Action;
    use std::io::Cursor;
    use todo_core::db::open_db_in_memory;
    use todo_core::{Filter, SqliteSlotRepository, TodoStore};

    #[test]
    fn parse_line_handles_verbs_and_aliases() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(
            parse_line("add  Buy milk ").unwrap(),
            Some(ShellCommand::Apply(Action::Add("Buy milk".to_string())))
        );
        assert_eq!(
            parse_line("e abc new title").unwrap(),
            Some(ShellCommand::Apply(Action::Edit(
                "abc".to_string(),
                "new title".to_string()
            )))
        );
        assert_eq!(
            parse_line("edit abc").unwrap(),
            Some(ShellCommand::Apply(Action::Edit(
                "abc".to_string(),
                String::new()
            )))
        );
        assert_eq!(
            parse_line("FILTER Completed").unwrap(),
            Some(ShellCommand::Apply(Action::SetFilter(Filter::Completed)))
        );
        assert_eq!(parse_line("q").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn parse_line_rejects_missing_id_and_unknown_input() {
        assert!(parse_line("toggle").unwrap_err().contains("needs a todo id"));
        assert!(parse_line("filter done").is_err());
        assert!(parse_line("frobnicate").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn session_applies_commands_and_keeps_filter_in_memory() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        let mut store = TodoStore::load(repo);
        let input = Cursor::new("add Buy milk\nadd Walk dog\nfilter active\nbogus\nquit\nadd never\n");
        let mut output = Vec::new();

        run_shell(&mut store, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("No tasks"));
        assert!(text.contains("showing active"));
        assert!(text.contains("error: unknown command `bogus`"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.filter(), Filter::Active);

        let reloaded = TodoStore::load(repo);
        assert_eq!(reloaded.todos(), store.todos());
        assert_eq!(reloaded.filter(), Filter::All);
    }
}
