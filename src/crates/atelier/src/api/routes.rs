//! API route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::{handlers, middleware::cors_layer};
use crate::executor::Executor;
use crate::registry::Registry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The synchronized store of truth
    pub registry: Arc<Registry>,
    /// Driver for asynchronous task execution
    pub executor: Arc<Executor>,
}

/// Build the complete API router
pub fn create_router(registry: Arc<Registry>, executor: Arc<Executor>) -> Router {
    let state = AppState { registry, executor };

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Project endpoints
        .route(
            "/projects",
            post(handlers::create_project).get(handlers::list_projects),
        )
        .route(
            "/projects/:id",
            get(handlers::get_project).delete(handlers::delete_project),
        )
        .route(
            "/projects/:id/tasks",
            post(handlers::create_task).get(handlers::get_project_tasks),
        )
        .route("/projects/:id/status", get(handlers::get_project_status))
        .route("/projects/:id/start", post(handlers::start_project))
        // Task endpoints
        .route(
            "/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tasks/:id/start", post(handlers::start_task))
        .route("/tasks/:id/status", get(handlers::get_task_status))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
