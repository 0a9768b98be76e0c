//! Error types for the todo store.
//!
//! # Design
//! `NotFound` is an expected outcome that callers are meant to branch on, so
//! it gets its own variant. `InvalidRecord` carries the same field-level
//! detail the validation layer produces, letting the HTTP layer render both
//! identically.

use thiserror::Error;

use crate::validate::ValidationErrors;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No live record has this id.
    #[error("todo not found: {0}")]
    NotFound(String),

    /// The record would break a field constraint; nothing was written.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ValidationErrors),
}

pub type StoreResult<T> = Result<T, StoreError>;
