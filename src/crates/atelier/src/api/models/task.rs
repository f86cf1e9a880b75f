//! Task API models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::middleware::validation;
use crate::domain::{NewTask, Task, TaskStatus, TaskUpdate};

/// Request to create a new task under a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task name (required)
    pub name: String,

    /// Task description (required)
    pub description: String,

    /// Task type (e.g. "feature", "bug", "enhancement")
    #[serde(rename = "type", default)]
    pub task_type: String,

    /// Scheduling display priority, lower value = higher precedence
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Free-form requirements handed to the worker
    #[serde(default)]
    pub requirements: String,
}

fn default_priority() -> i32 {
    3
}

impl CreateTaskRequest {
    /// Validate the create request
    pub fn validate(&self) -> ApiResult<()> {
        validation::validate_not_empty(&self.name, "name")?;
        validation::validate_string_length(&self.name, "name", 1, 255)?;
        validation::validate_not_empty(&self.description, "description")?;
        Ok(())
    }

    /// Convert into the domain creation spec
    pub fn into_spec(self) -> NewTask {
        NewTask {
            name: self.name,
            description: self.description,
            task_type: self.task_type,
            priority: self.priority,
            requirements: self.requirements,
        }
    }
}

/// Request to update a task's descriptive metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// Updated name (optional)
    pub name: Option<String>,

    /// Updated description (optional)
    pub description: Option<String>,

    /// Updated type (optional)
    #[serde(rename = "type")]
    pub task_type: Option<String>,

    /// Updated priority (optional)
    pub priority: Option<i32>,

    /// Updated requirements (optional)
    pub requirements: Option<String>,
}

impl UpdateTaskRequest {
    /// Convert into the domain update
    pub fn into_update(self) -> TaskUpdate {
        TaskUpdate {
            name: self.name,
            description: self.description,
            task_type: self.task_type,
            priority: self.priority,
            requirements: self.requirements,
        }
    }
}

/// Task response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task id
    pub id: Uuid,

    /// Owning project id
    pub project_id: Uuid,

    /// Task name
    pub name: String,

    /// Task description
    pub description: String,

    /// Task type
    #[serde(rename = "type")]
    pub task_type: String,

    /// Scheduling display priority
    pub priority: i32,

    /// Requirements handed to the worker
    pub requirements: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Progress percentage 0-100
    pub progress: u8,

    /// Current executor stage; absent unless running or completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    /// Build a response from a registry task snapshot
    pub fn from_task(task: Task) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            name: task.name,
            description: task.description,
            task_type: task.task_type,
            priority: task.priority,
            requirements: task.requirements,
            status: task.status,
            progress: task.progress,
            current_phase: task.current_phase,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Polling payload for GET /tasks/:id/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    /// Current lifecycle status
    pub status: TaskStatus,
    /// Progress percentage 0-100
    pub progress: u8,
    /// Current executor stage; absent unless running or completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TaskStatusResponse {
    /// Build the polling payload from a task snapshot
    pub fn from_task(task: &Task) -> Self {
        Self {
            status: task.status,
            progress: task.progress,
            current_phase: task.current_phase.clone(),
            updated_at: task.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_name_and_description() {
        let req = CreateTaskRequest {
            name: "Backend".to_string(),
            description: "REST API".to_string(),
            task_type: "feature".to_string(),
            priority: 1,
            requirements: String::new(),
        };
        assert!(req.validate().is_ok());

        let req = CreateTaskRequest {
            name: String::new(),
            description: "REST API".to_string(),
            task_type: "feature".to_string(),
            priority: 1,
            requirements: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_defaults_from_json() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"name":"t","description":"d"}"#).unwrap();
        assert_eq!(req.priority, 3);
        assert!(req.task_type.is_empty());
    }

    #[test]
    fn status_response_omits_absent_phase() {
        let task = Task::new(
            Uuid::new_v4(),
            NewTask {
                name: "t".to_string(),
                description: "d".to_string(),
                task_type: "feature".to_string(),
                priority: 1,
                requirements: String::new(),
            },
        );
        let json = serde_json::to_value(TaskStatusResponse::from_task(&task)).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["progress"], 0);
        assert!(json.get("current_phase").is_none());
    }
}
