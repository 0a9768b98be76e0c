//! HTTP interface for the todo store.
//!
//! # Design
//! `app` takes an explicitly constructed `TodoStore` and wraps it in one
//! coarse `RwLock`, so handlers that may run in parallel still apply each
//! store operation as a single step. Request bodies are extracted as raw
//! JSON and handed to `todo_core::validate` before the store is touched.

pub mod config;
pub mod error;
pub mod telemetry;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use todo_core::{validate, Todo, TodoStore};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ServerError};

pub type SharedStore = Arc<RwLock<TodoStore>>;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct Deleted {
    deleted: usize,
}

pub fn app(store: TodoStore) -> Router {
    let store: SharedStore = Arc::new(RwLock::new(store));
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Serve a fresh store on `listener` until Ctrl-C.
pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn list_todos(State(store): State<SharedStore>) -> Json<Vec<Todo>> {
    let store = store.read().await;
    Json(store.get_all().to_vec())
}

async fn get_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let store = store.read().await;
    store
        .get_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn create_todo(
    State(store): State<SharedStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(body) = body?;
    let input = validate::new_todo(&body)?;
    let todo = store.write().await.create(input)?;
    tracing::info!(todo.id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let mut store = store.write().await;
    // An unknown id wins over a bad body.
    if store.get_by_id(&id).is_none() {
        return Err(ApiError::NotFound(id));
    }
    let Json(body) = body?;
    let patch = validate::todo_patch(&body)?;
    let todo = store.update(&id, patch)?;
    tracing::info!(todo.id = %todo.id, "todo updated");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = store.write().await.delete_by_id(&id)?;
    tracing::info!(todo.id = %todo.id, "todo deleted");
    Ok(Json(todo))
}

async fn delete_all_todos(State(store): State<SharedStore>) -> Json<Deleted> {
    let deleted = store.write().await.delete_all();
    tracing::info!(deleted, "all todos deleted");
    Json(Deleted { deleted })
}
