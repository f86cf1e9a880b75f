//! Task endpoint handlers
//!
//! Task reads, metadata updates, start, status polling, and deletion.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation;
use crate::api::models::{MessageResponse, TaskResponse, TaskStatusResponse, UpdateTaskRequest};
use crate::api::response;
use crate::api::routes::AppState;

/// Get a single task
///
/// GET /tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    let task = state.registry.get_task(id)?;
    Ok(response::ok(TaskResponse::from_task(task)))
}

/// Update a task's descriptive metadata
///
/// PUT /tasks/:id. Conflict while the task is running.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    let update = req.into_update();
    if !update.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let task = state.registry.update_task(id, update)?;
    Ok(response::ok(TaskResponse::from_task(task)))
}

/// Delete a task, cancelling its executor unit first if running
///
/// DELETE /tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    state.registry.delete_task(id)?;
    Ok(response::ok(MessageResponse::new(
        "Task deleted successfully",
    )))
}

/// Begin asynchronous execution of a task
///
/// POST /tasks/:id/start. Returns as soon as the driver is spawned.
pub async fn start_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    state.executor.start(id)?;
    Ok(response::ok(MessageResponse::new(
        "Task started successfully",
    )))
}

/// Poll a task's execution status
///
/// GET /tasks/:id/status
pub async fn get_task_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    let task = state.registry.get_task(id)?;
    Ok(response::ok(TaskStatusResponse::from_task(&task)))
}
