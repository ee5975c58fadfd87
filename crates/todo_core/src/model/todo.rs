//! Todo record model.
//!
//! # Responsibility
//! - Define the canonical todo record and its JSON wire shape.
//! - Provide constructors and record-level validation.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - `created_at` is set once and never mutated.
//! - `title` is stored trimmed and is never empty for a live record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque identifier of a todo record.
///
/// Kept as a plain string because persisted ids are not guaranteed to be
/// UUIDs; only uniqueness within a collection matters.
pub type TodoId = String;

/// One task in the todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    /// Older payloads used `text` for this field.
    #[serde(alias = "text")]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Unix epoch milliseconds. Absent for records restored from payloads
    /// that never carried a creation time.
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "deserialize_epoch_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<i64>,
}

/// Validation errors for record-level invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyId,
    EmptyTitle,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "todo id must not be empty"),
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

impl Todo {
    /// Creates an incomplete todo with a generated id and the current time.
    ///
    /// The title is trimmed; callers are expected to reject empty input
    /// before reaching this constructor.
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            completed: false,
            created_at: Some(now_epoch_ms()),
        }
    }

    /// Creates a todo with a caller-provided identity.
    ///
    /// Used by import paths and tests where the id already exists.
    pub fn with_id(
        id: impl Into<TodoId>,
        title: &str,
        created_at: Option<i64>,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            id: id.into(),
            title: title.trim().to_string(),
            completed: false,
            created_at,
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty or whitespace-only.
    /// - `EmptyTitle` when `title` is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.trim().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Accepts any JSON number; fractional milliseconds are truncated and
/// out-of-range values saturate.
fn deserialize_epoch_ms<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.map(|number| {
        number
            .as_i64()
            .unwrap_or_else(|| number.as_f64().map_or(i64::MAX, |value| value as i64))
    }))
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoValidationError};

    #[test]
    fn new_trims_title_and_sets_defaults() {
        let todo = Todo::new("  Buy milk  ");
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert!(!todo.id.is_empty());
        assert!(todo.created_at.is_some_and(|ms| ms > 0));
    }

    #[test]
    fn new_generates_distinct_ids() {
        let first = Todo::new("a");
        let second = Todo::new("a");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn created_at_accepts_integer_float_and_exponent_numbers() {
        let cases = [
            (r#"{"id":"a","title":"x","createdAt":1700000000000}"#, Some(1_700_000_000_000)),
            (r#"{"id":"a","title":"x","createdAt":1700000000000.9}"#, Some(1_700_000_000_000)),
            (r#"{"id":"a","title":"x","createdAt":1.7e12}"#, Some(1_700_000_000_000)),
            (r#"{"id":"a","title":"x","createdAt":null}"#, None),
            (r#"{"id":"a","title":"x"}"#, None),
        ];
        for (raw, expected) in cases {
            let todo: Todo = serde_json::from_str(raw).unwrap();
            assert_eq!(todo.created_at, expected, "{raw}");
        }
        assert!(serde_json::from_str::<Todo>(r#"{"id":"a","title":"x","createdAt":"soon"}"#).is_err());
    }

    #[test]
    fn with_id_rejects_blank_fields() {
        assert_eq!(
            Todo::with_id("", "title", None).unwrap_err(),
            TodoValidationError::EmptyId
        );
        assert_eq!(
            Todo::with_id("t-1", "   ", None).unwrap_err(),
            TodoValidationError::EmptyTitle
        );
    }
}
