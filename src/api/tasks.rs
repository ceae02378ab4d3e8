//! Task CRUD handlers.
//!
//! List and get serialize explicitly so encode failures can be reported
//! with the statuses the contract fixes (500 on list, 400 on get);
//! create and update parse the raw body themselves for the same reason.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::store::Task;

use super::routes::AppState;

/// List all tasks as a JSON object keyed by id.
///
/// An empty store is reported as a server error rather than an empty
/// object; existing clients depend on this.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    let tasks = state.store.list().await;

    let body = serde_json::to_string(&tasks).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to serialize tasks: {}", e),
        )
    })?;

    if tasks.is_empty() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "no tasks found".to_string(),
        ));
    }

    Ok((StatusCode::OK, body))
}

/// Get a single task by id.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    let task = state.store.get(&id).await.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("task with id = {} not found", id),
        )
    })?;

    let body = serde_json::to_string(&task).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("failed to serialize task: {}", e),
        )
    })?;

    Ok((StatusCode::OK, body))
}

/// Create a new task from the request body.
pub async fn add_task(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let task = parse_task(&body)?;

    state
        .store
        .insert(task)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(StatusCode::CREATED)
}

/// Replace an existing task with the one in the request body.
///
/// The target id comes from the body, not the path; this is a full
/// replace, not a partial patch.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let task = parse_task(&body)?;

    state
        .store
        .replace(task)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(StatusCode::OK)
}

/// Delete a task by id.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .store
        .remove(&id)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(StatusCode::OK)
}

/// Parse and validate a task from a raw request body.
fn parse_task(body: &Bytes) -> Result<Task, (StatusCode, String)> {
    let task: Task = serde_json::from_slice(body)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("failed to parse task: {}", e)))?;

    task.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(task)
}
