//! HTTP error mapping.
//!
//! # Design
//! Handlers return `ApiError`; its `IntoResponse` impl is the single place
//! where failures become status codes and JSON bodies:
//! validation → 400 with per-field detail, unknown id → 404, anything else
//! → 500 with a generic message (the cause is logged, not returned).

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use todo_core::{StoreError, ValidationErrors};

/// Request-level failures, rendered as JSON error responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("todo not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failures that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Telemetry(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<ValidationErrors>,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::InvalidRecord(errors) => ApiError::Validation(errors),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationErrors::invalid_body(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(%errors, "rejected payload");
                let body = ErrorBody {
                    error: "Validation error",
                    details: Some(errors),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::NotFound(id) => {
                tracing::debug!(todo.id = %id, "todo not found");
                let body = ErrorBody {
                    error: "Todo not found",
                    details: None,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(%message, "internal error");
                let body = ErrorBody {
                    error: "Internal server error",
                    details: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Turn a handler panic into the same 500 body as any other internal fault.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(message).into_response()
}
