//! Storage and validation contract for todo records.
//!
//! # Overview
//! Holds the in-memory [`TodoStore`] and the field rules every stored todo
//! obeys. Nothing in this crate does I/O; the HTTP layer lives in
//! `todo-server`.
//!
//! # Design
//! - `validate` turns raw JSON into `NewTodo` / `TodoPatch`, collecting one
//!   `FieldError` per offending field.
//! - `TodoStore` re-checks the same length bounds on every write and owns id
//!   and timestamp generation.
//! - The store is a plain owned value. Sharing and locking are the caller's
//!   concern.

pub mod error;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{StoreError, StoreResult};
pub use store::{Clock, SystemClock, TodoStore};
pub use types::{DescriptionPatch, NewTodo, Todo, TodoPatch};
pub use validate::{FieldError, FieldErrorKind, ValidationErrors};
