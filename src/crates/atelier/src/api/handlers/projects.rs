//! Project endpoint handlers
//!
//! Project CRUD, task creation under a project, and the aggregate status
//! report.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::ApiResult;
use crate::api::middleware::validation;
use crate::api::models::{
    CreateProjectRequest, CreateTaskRequest, MessageResponse, ProjectResponse, TaskResponse,
};
use crate::api::response;
use crate::api::routes::AppState;

/// Create a new project
///
/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    let project = state.registry.create_project(req.into_spec())?;
    Ok(response::created(ProjectResponse::from_snapshot(
        project,
        Vec::new(),
    )))
}

/// List all projects in creation order
///
/// GET /projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let projects = state.registry.list_projects();
    let mut responses = Vec::with_capacity(projects.len());
    for project in projects {
        let tasks = state.registry.get_tasks(project.id).unwrap_or_default();
        responses.push(ProjectResponse::from_snapshot(project, tasks));
    }
    Ok(response::ok(responses))
}

/// Get a single project with its task snapshot
///
/// GET /projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    let project = state.registry.get_project(id)?;
    let tasks = state.registry.get_tasks(id)?;
    Ok(response::ok(ProjectResponse::from_snapshot(project, tasks)))
}

/// Delete a project, cascading to its tasks
///
/// DELETE /projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    state.registry.delete_project(id)?;
    Ok(response::ok(MessageResponse::new(
        "Project deleted successfully",
    )))
}

/// Start every pending task in a project
///
/// POST /projects/:id/start
pub async fn start_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    state.executor.start_project(id)?;
    Ok(response::ok(MessageResponse::new(
        "Project started successfully",
    )))
}

/// Create a task under a project
///
/// POST /projects/:id/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;
    req.validate()?;

    let task = state.registry.create_task(id, req.into_spec())?;
    Ok(response::created(TaskResponse::from_task(task)))
}

/// List a project's tasks in creation order
///
/// GET /projects/:id/tasks
pub async fn get_project_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    let tasks = state.registry.get_tasks(id)?;
    let responses: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from_task).collect();
    Ok(response::ok(responses))
}

/// Aggregate status report for a project
///
/// GET /projects/:id/status
pub async fn get_project_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let id = validation::validate_uuid(&id)?;

    let report = state.registry.project_status(id)?;
    Ok(response::ok(report))
}
