//! Task entity and lifecycle state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task execution status
///
/// Lifecycle: `Pending -> Running -> {Completed, Failed, Cancelled}`.
/// `Running -> Running` occurs as progress advances; nothing leaves a
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Created but not started
    Pending,
    /// Driven by an executor unit
    Running,
    /// Finished successfully (progress is 100)
    Completed,
    /// An execution step errored
    Failed,
    /// Stopped cooperatively before finishing
    Cancelled,
}

impl TaskStatus {
    /// Whether this status is terminal
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Whether the transition `self -> next` is allowed
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Running),
            Self::Running => matches!(
                next,
                Self::Running | Self::Completed | Self::Failed | Self::Cancelled
            ),
            Self::Completed | Self::Failed | Self::Cancelled => false,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Task name (required)
    pub name: String,
    /// Task description (required)
    pub description: String,
    /// Task type (e.g. "feature", "bug", "enhancement")
    pub task_type: String,
    /// Scheduling display priority, lower value = higher precedence
    pub priority: i32,
    /// Free-form requirements handed to the worker
    pub requirements: String,
}

/// Partial update to a task's descriptive metadata
///
/// Only set fields are merged; live fields (status, progress, phase) are
/// owned by the executor and cannot be patched here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<String>,
    pub priority: Option<i32>,
    pub requirements: Option<String>,
}

impl TaskUpdate {
    /// Whether any field is being updated
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.task_type.is_some()
            || self.priority.is_some()
            || self.requirements.is_some()
    }
}

/// A unit of work owned by exactly one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier, globally unique across the registry
    pub id: Uuid,
    /// Owning project
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
    /// Progress percentage, 0-100, monotonically non-decreasing while running
    pub progress: u8,
    /// Current executor stage; absent unless running or completed
    pub current_phase: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task under the given project
    pub fn new(project_id: Uuid, spec: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: spec.name,
            description: spec.description,
            task_type: spec.task_type,
            priority: spec.priority,
            requirements: spec.requirements,
            status: TaskStatus::Pending,
            progress: 0,
            current_phase: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied metadata fields into this task
    pub fn apply_update(&mut self, update: TaskUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(task_type) = update.task_type {
            self.task_type = task_type;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(requirements) = update.requirements {
            self.requirements = requirements;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> NewTask {
        NewTask {
            name: "backend api".to_string(),
            description: "REST endpoints".to_string(),
            task_type: "feature".to_string(),
            priority: 1,
            requirements: "axum handlers".to_string(),
        }
    }

    #[test]
    fn new_task_is_pending_with_zero_progress() {
        let task = Task::new(Uuid::new_v4(), spec());
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.progress, 0);
        assert!(task.current_phase.is_none());
    }

    #[test]
    fn pending_transitions() {
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Running));
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Cancelled));
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Failed));
    }

    #[test]
    fn running_transitions() {
        assert!(TaskStatus::Running.can_transition_to(TaskStatus::Running));
        assert!(TaskStatus::Running.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::Running.can_transition_to(TaskStatus::Failed));
        assert!(TaskStatus::Running.can_transition_to(TaskStatus::Cancelled));
        assert!(!TaskStatus::Running.can_transition_to(TaskStatus::Pending));
    }

    #[test]
    fn terminal_states_are_sticky() {
        for terminal in [
            TaskStatus::Completed,
            TaskStatus::Failed,
            TaskStatus::Cancelled,
        ] {
            assert!(terminal.is_terminal());
            for next in [
                TaskStatus::Pending,
                TaskStatus::Running,
                TaskStatus::Completed,
                TaskStatus::Failed,
                TaskStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Running).unwrap();
        assert_eq!(json, "\"running\"");
        assert_eq!(TaskStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn apply_update_merges_only_set_fields() {
        let mut task = Task::new(Uuid::new_v4(), spec());
        task.apply_update(TaskUpdate {
            name: Some("renamed".to_string()),
            priority: Some(3),
            ..TaskUpdate::default()
        });
        assert_eq!(task.name, "renamed");
        assert_eq!(task.priority, 3);
        assert_eq!(task.description, "REST endpoints");
    }

    #[test]
    fn empty_update_has_no_updates() {
        assert!(!TaskUpdate::default().has_updates());
        let update = TaskUpdate {
            requirements: Some("tests".to_string()),
            ..TaskUpdate::default()
        };
        assert!(update.has_updates());
    }
}
