//! API models and DTOs

pub mod project;
pub mod task;

pub use project::{CreateProjectRequest, ProjectResponse};
pub use task::{CreateTaskRequest, TaskResponse, TaskStatusResponse, UpdateTaskRequest};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Simple message payload for start/delete acknowledgements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement
    pub message: String,
}

impl MessageResponse {
    /// Create a message payload
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Current server time, RFC 3339
    pub time: String,
}

impl HealthResponse {
    /// Health payload with the current timestamp
    pub fn now(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            time: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_carries_timestamp() {
        let health = HealthResponse::now("ok");
        assert_eq!(health.status, "ok");
        assert!(!health.time.is_empty());
    }
}
