//! Field validation for todo payloads.
//!
//! # Design
//! Request bodies arrive as `serde_json::Value` and are checked field by
//! field, so every offending field is reported at once along with the
//! reason. Unknown fields are ignored. Upper length bounds apply to the text
//! as sent; the text is then trimmed, so a blank title is too short. Lengths
//! count Unicode scalar values, not bytes.
//!
//! The length checks are also exported on their own because the store
//! re-applies them to every record it writes.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{DescriptionPatch, NewTodo, TodoPatch};

pub const TITLE_MIN_CHARS: usize = 1;
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    WrongType,
    TooShort,
    TooLong,
    InvalidBody,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, FieldErrorKind::Missing, format!("{field} is required"))
    }

    fn wrong_type(field: &str, expected: &str) -> Self {
        Self::new(
            field,
            FieldErrorKind::WrongType,
            format!("{field} must be {expected}"),
        )
    }
}

/// Every field error found in one payload. Never empty when returned as an
/// `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// The body itself could not be used (not JSON, not an object).
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::single(FieldError::new("body", FieldErrorKind::InvalidBody, message))
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Record the error side of `result`, handing back the value otherwise.
    fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check the stored-title bound. The value is taken as-is, no trimming.
pub fn check_title(title: &str) -> Result<(), FieldError> {
    let len = title.chars().count();
    if len < TITLE_MIN_CHARS {
        return Err(FieldError::new(
            "title",
            FieldErrorKind::TooShort,
            format!("title must be at least {TITLE_MIN_CHARS} character"),
        ));
    }
    if len > TITLE_MAX_CHARS {
        return Err(FieldError::new(
            "title",
            FieldErrorKind::TooLong,
            format!("title must be at most {TITLE_MAX_CHARS} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Check the stored-description bound. The value is taken as-is.
pub fn check_description(description: &str) -> Result<(), FieldError> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(FieldError::new(
            "description",
            FieldErrorKind::TooLong,
            format!("description must be at most {DESCRIPTION_MAX_CHARS} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Validate a create payload.
///
/// `title` is required; `description` defaults to null and `completed` to
/// `false`.
pub fn new_todo(body: &Value) -> Result<NewTodo, ValidationErrors> {
    let fields = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let title = match fields.get("title") {
        Some(value) => errors.collect(parse_title(value)),
        None => {
            errors.push(FieldError::missing("title"));
            None
        }
    };
    let description = fields
        .get("description")
        .and_then(|value| errors.collect(parse_description(value)))
        .flatten();
    let completed = fields
        .get("completed")
        .and_then(|value| errors.collect(parse_completed(value)))
        .unwrap_or(false);

    match title {
        Some(title) if errors.is_empty() => Ok(NewTodo {
            title,
            description,
            completed,
        }),
        _ => Err(errors),
    }
}

/// Validate an update payload. Every field is optional and an empty object
/// is a valid (empty) patch. An explicit `null` title or completed flag
/// leaves that field unchanged; a `null` or blank description clears it.
pub fn todo_patch(body: &Value) -> Result<TodoPatch, ValidationErrors> {
    let fields = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let title = match fields.get("title") {
        None | Some(Value::Null) => None,
        Some(value) => errors.collect(parse_title(value)),
    };
    let description = match fields.get("description") {
        None => DescriptionPatch::Keep,
        Some(value) => match errors.collect(parse_description(value)) {
            Some(Some(text)) => DescriptionPatch::Set(text),
            Some(None) => DescriptionPatch::Clear,
            None => DescriptionPatch::Keep,
        },
    };
    let completed = match fields.get("completed") {
        None | Some(Value::Null) => None,
        Some(value) => errors.collect(parse_completed(value)),
    };

    if errors.is_empty() {
        Ok(TodoPatch {
            title,
            description,
            completed,
        })
    } else {
        Err(errors)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object()
        .ok_or_else(|| ValidationErrors::invalid_body("request body must be a JSON object"))
}

/// The upper bound applies to the text as sent, before trimming.
fn check_raw_length(field: &str, raw: &str, max: usize) -> Result<(), FieldError> {
    let len = raw.chars().count();
    if len > max {
        return Err(FieldError::new(
            field,
            FieldErrorKind::TooLong,
            format!("{field} must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

fn parse_title(value: &Value) -> Result<String, FieldError> {
    let raw = value
        .as_str()
        .ok_or_else(|| FieldError::wrong_type("title", "a string"))?;
    check_raw_length("title", raw, TITLE_MAX_CHARS)?;
    let title = raw.trim();
    check_title(title)?;
    Ok(title.to_string())
}

/// `Ok(None)` means the description is null after normalisation.
fn parse_description(value: &Value) -> Result<Option<String>, FieldError> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => {
            check_raw_length("description", raw, DESCRIPTION_MAX_CHARS)?;
            let description = raw.trim();
            check_description(description)?;
            Ok((!description.is_empty()).then(|| description.to_string()))
        }
        _ => Err(FieldError::wrong_type("description", "a string or null")),
    }
}

fn parse_completed(value: &Value) -> Result<bool, FieldError> {
    value
        .as_bool()
        .ok_or_else(|| FieldError::wrong_type("completed", "a boolean"))
}
