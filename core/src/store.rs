//! In-memory todo store.
//!
//! # Design
//! Records live in a `Vec` in insertion order and every lookup is a linear
//! scan; the collection is expected to stay small. The store holds no lock
//! of its own. Whoever shares it across threads wraps the whole value in one
//! coarse lock, which keeps each operation a single all-or-nothing step.
//!
//! Field constraints are checked again here even though the HTTP layer
//! validates first, so no write path can store a record that breaks them.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::types::{DescriptionPatch, NewTodo, Todo, TodoPatch};
use crate::validate::{check_description, check_title, ValidationErrors};

/// Source of timestamps for created and updated records.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The authoritative collection of todos.
pub struct TodoStore {
    todos: Vec<Todo>,
    clock: Box<dyn Clock>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("todos", &self.todos)
            .finish_non_exhaustive()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            todos: Vec::new(),
            clock: Box::new(clock),
        }
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Insert a new record with a fresh id. `created_at` and `updated_at`
    /// are the same instant.
    pub fn create(&mut self, input: NewTodo) -> StoreResult<Todo> {
        let NewTodo {
            title,
            description,
            completed,
        } = input;
        let now = self.clock.now();
        let todo = Todo {
            id: self.fresh_id(),
            title,
            description: description.filter(|d| !d.is_empty()),
            completed,
            created_at: now,
            updated_at: now,
        };
        check_record(&todo)?;
        self.todos.push(todo.clone());
        Ok(todo)
    }

    /// All records, oldest first.
    pub fn get_all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Merge `patch` onto the record and refresh `updated_at`, which always
    /// moves strictly forward, even for an empty patch.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> StoreResult<Todo> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut next = todo.clone();
        if let Some(title) = patch.title {
            next.title = title;
        }
        match patch.description {
            DescriptionPatch::Keep => {}
            DescriptionPatch::Clear => next.description = None,
            DescriptionPatch::Set(text) => next.description = Some(text).filter(|d| !d.is_empty()),
        }
        if let Some(completed) = patch.completed {
            next.completed = completed;
        }
        check_record(&next)?;

        let now = self.clock.now();
        next.updated_at = if now > todo.updated_at {
            now
        } else {
            todo.updated_at + Duration::nanoseconds(1)
        };
        *todo = next.clone();
        Ok(next)
    }

    /// Remove the record and hand it back.
    pub fn delete_by_id(&mut self, id: &str) -> StoreResult<Todo> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.todos.remove(index))
    }

    /// Drop every record. Returns how many were removed.
    pub fn delete_all(&mut self) -> usize {
        let removed = self.todos.len();
        self.todos.clear();
        removed
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get_by_id(&id).is_none() {
                return id;
            }
        }
    }
}

fn check_record(todo: &Todo) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Err(error) = check_title(&todo.title) {
        errors.push(error);
    }
    if let Some(description) = &todo.description {
        if let Err(error) = check_description(description) {
            errors.push(error);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
