//! Project API models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::middleware::validation;
use crate::api::models::task::TaskResponse;
use crate::domain::{NewProject, Project, ProjectStatus, ProjectStatusReport, Task};

/// Request to create a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name (required)
    pub name: String,

    /// Project description (required)
    pub description: String,

    /// Owning organization label
    #[serde(default)]
    pub organization: String,

    /// Model identifier passed through to the worker
    #[serde(default)]
    pub model: String,

    /// Opaque configuration string
    #[serde(default)]
    pub config: String,
}

impl CreateProjectRequest {
    /// Validate the create request
    pub fn validate(&self) -> ApiResult<()> {
        validation::validate_not_empty(&self.name, "name")?;
        validation::validate_string_length(&self.name, "name", 1, 255)?;
        validation::validate_not_empty(&self.description, "description")?;
        Ok(())
    }

    /// Convert into the domain creation spec
    pub fn into_spec(self) -> NewProject {
        NewProject {
            name: self.name,
            description: self.description,
            organization: self.organization,
            model: self.model,
            config: self.config,
        }
    }
}

/// Project response with derived status and embedded task snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Project id
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Owning organization label
    pub organization: String,

    /// Model identifier
    pub model: String,

    /// Opaque configuration string
    pub config: String,

    /// Derived project status, recomputed from the tasks
    pub status: ProjectStatus,

    /// Owned tasks in creation order
    pub tasks: Vec<TaskResponse>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
    /// Build a response from a project snapshot and its task snapshot
    pub fn from_snapshot(project: Project, tasks: Vec<Task>) -> Self {
        let status = ProjectStatusReport::from_tasks(&tasks).status;
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            organization: project.organization,
            model: project.model,
            config: project.config,
            status,
            tasks: tasks.into_iter().map(TaskResponse::from_task).collect(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_name_and_description() {
        let req = CreateProjectRequest {
            name: "Snake".to_string(),
            description: "A game".to_string(),
            organization: String::new(),
            model: String::new(),
            config: String::new(),
        };
        assert!(req.validate().is_ok());

        let req = CreateProjectRequest {
            name: "Snake".to_string(),
            description: String::new(),
            organization: String::new(),
            model: String::new(),
            config: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn new_project_response_is_pending_with_no_tasks() {
        let project = Project::new(NewProject {
            name: "Snake".to_string(),
            description: "A game".to_string(),
            organization: "acme".to_string(),
            model: "default".to_string(),
            config: String::new(),
        });
        let resp = ProjectResponse::from_snapshot(project, Vec::new());
        assert_eq!(resp.status, ProjectStatus::Pending);
        assert!(resp.tasks.is_empty());
    }
}
