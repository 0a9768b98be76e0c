//! Domain types for the todo store.
//!
//! # Design
//! `Todo` is both the stored record and its wire shape. `NewTodo` and
//! `TodoPatch` are the already-validated inputs the store accepts. They are
//! produced by [`crate::validate`] from raw JSON rather than deserialized
//! directly, so a wrong-typed field is reported per field instead of failing
//! the whole body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// What an update does to the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DescriptionPatch {
    /// Field omitted: keep the stored value.
    #[default]
    Keep,
    /// Explicit `null` or empty string.
    Clear,
    Set(String),
}

/// Partial update. Fields left as `None` / [`DescriptionPatch::Keep`] are
/// not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: DescriptionPatch,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description == DescriptionPatch::Keep
            && self.completed.is_none()
    }
}
