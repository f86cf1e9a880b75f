//! Registry error taxonomy

use thiserror::Error;
use uuid::Uuid;

use crate::domain::TaskStatus;

/// Errors returned by registry operations
///
/// NotFound, Conflict and Validation surface synchronously to callers;
/// execution failures never appear here, they are recorded in task status.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Unknown project id
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Unknown task id
    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    /// Mutation raced with the task's current lifecycle state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Disallowed state machine transition
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        /// State the task was in
        from: TaskStatus,
        /// State the report tried to move it to
        to: TaskStatus,
    },
}

impl RegistryError {
    /// Whether this error denotes a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_) | Self::TaskNotFound(_))
    }
}
