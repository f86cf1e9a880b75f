//! Project entity and aggregate status computation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::{Task, TaskStatus};

/// Fields supplied when creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name (required)
    pub name: String,
    /// Project description (required)
    pub description: String,
    /// Owning organization label
    pub organization: String,
    /// Model identifier passed through to the worker
    pub model: String,
    /// Opaque configuration string
    pub config: String,
}

/// A named container owning an ordered set of tasks
///
/// The project never stores its status; it is recomputed from the tasks
/// on every query (see [`ProjectStatusReport`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier, immutable after creation
    pub id: Uuid,
    /// Project name
    pub name: String,
    /// Project description
    pub description: String,
    /// Owning organization label
    pub organization: String,
    /// Model identifier passed through to the worker
    pub model: String,
    /// Opaque configuration string
    pub config: String,
    /// Owned task ids in creation order
    pub task_ids: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project with an empty task list
    pub fn new(spec: NewProject) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: spec.name,
            description: spec.description,
            organization: spec.organization,
            model: spec.model,
            config: spec.config,
            task_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Derived project-level status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// No tasks running, not all terminal (also the empty project)
    Pending,
    /// At least one task is running
    Running,
    /// Every task completed (and there is at least one)
    Completed,
    /// At least one task failed and none are running
    Failed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Aggregate rollup over a project's current tasks
///
/// Pure function of the task snapshot; recomputed on every query, never
/// cached. Precedence: running > failed > completed > pending, where the
/// all-completed rule is only consulted once nothing is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStatusReport {
    /// Derived project status
    pub status: ProjectStatus,
    /// Mean of task progress values, rounded to nearest integer
    pub progress: u8,
    /// Number of owned tasks
    pub total_tasks: usize,
    /// Number of tasks in `completed` status
    pub completed_tasks: usize,
}

impl ProjectStatusReport {
    /// Compute the aggregate report from a task snapshot
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        let any_running = tasks.iter().any(|t| t.status == TaskStatus::Running);
        let any_failed = tasks.iter().any(|t| t.status == TaskStatus::Failed);

        let status = if any_running {
            ProjectStatus::Running
        } else if any_failed {
            ProjectStatus::Failed
        } else if total_tasks > 0 && completed_tasks == total_tasks {
            ProjectStatus::Completed
        } else {
            ProjectStatus::Pending
        };

        let progress = if total_tasks == 0 {
            0
        } else {
            let sum: u32 = tasks.iter().map(|t| u32::from(t.progress)).sum();
            ((sum as f64 / total_tasks as f64).round()) as u8
        };

        Self {
            status,
            progress,
            total_tasks,
            completed_tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::NewTask;

    fn task_with(status: TaskStatus, progress: u8) -> Task {
        let mut task = Task::new(
            Uuid::new_v4(),
            NewTask {
                name: "t".to_string(),
                description: "d".to_string(),
                task_type: "feature".to_string(),
                priority: 1,
                requirements: String::new(),
            },
        );
        task.status = status;
        task.progress = progress;
        task
    }

    #[test]
    fn empty_project_is_pending_with_zero_progress() {
        let report = ProjectStatusReport::from_tasks(&[]);
        assert_eq!(report.status, ProjectStatus::Pending);
        assert_eq!(report.progress, 0);
        assert_eq!(report.total_tasks, 0);
        assert_eq!(report.completed_tasks, 0);
    }

    #[test]
    fn all_pending_reports_pending() {
        let tasks = vec![
            task_with(TaskStatus::Pending, 0),
            task_with(TaskStatus::Pending, 0),
            task_with(TaskStatus::Pending, 0),
        ];
        let report = ProjectStatusReport::from_tasks(&tasks);
        assert_eq!(report.status, ProjectStatus::Pending);
        assert_eq!(report.progress, 0);
        assert_eq!(report.total_tasks, 3);
    }

    #[test]
    fn running_dominates_everything() {
        let tasks = vec![
            task_with(TaskStatus::Failed, 40),
            task_with(TaskStatus::Running, 50),
            task_with(TaskStatus::Completed, 100),
        ];
        let report = ProjectStatusReport::from_tasks(&tasks);
        assert_eq!(report.status, ProjectStatus::Running);
    }

    #[test]
    fn failed_dominates_completed_when_nothing_runs() {
        let tasks = vec![
            task_with(TaskStatus::Completed, 100),
            task_with(TaskStatus::Failed, 70),
        ];
        let report = ProjectStatusReport::from_tasks(&tasks);
        assert_eq!(report.status, ProjectStatus::Failed);
    }

    #[test]
    fn all_completed_reports_completed() {
        let tasks = vec![
            task_with(TaskStatus::Completed, 100),
            task_with(TaskStatus::Completed, 100),
        ];
        let report = ProjectStatusReport::from_tasks(&tasks);
        assert_eq!(report.status, ProjectStatus::Completed);
        assert_eq!(report.progress, 100);
        assert_eq!(report.completed_tasks, 2);
    }

    #[test]
    fn one_completed_two_pending_is_pending_at_a_third() {
        let tasks = vec![
            task_with(TaskStatus::Completed, 100),
            task_with(TaskStatus::Pending, 0),
            task_with(TaskStatus::Pending, 0),
        ];
        let report = ProjectStatusReport::from_tasks(&tasks);
        assert_eq!(report.status, ProjectStatus::Pending);
        assert_eq!(report.progress, 33);
        assert_eq!(report.completed_tasks, 1);
    }

    #[test]
    fn progress_is_rounded_mean() {
        let tasks = vec![
            task_with(TaskStatus::Running, 50),
            task_with(TaskStatus::Pending, 0),
        ];
        assert_eq!(ProjectStatusReport::from_tasks(&tasks).progress, 25);

        let tasks = vec![
            task_with(TaskStatus::Running, 33),
            task_with(TaskStatus::Running, 34),
        ];
        // 33.5 rounds half away from zero
        assert_eq!(ProjectStatusReport::from_tasks(&tasks).progress, 34);
    }

    #[test]
    fn cancelled_tasks_leave_project_pending() {
        let tasks = vec![
            task_with(TaskStatus::Cancelled, 30),
            task_with(TaskStatus::Pending, 0),
        ];
        let report = ProjectStatusReport::from_tasks(&tasks);
        assert_eq!(report.status, ProjectStatus::Pending);
    }
}
