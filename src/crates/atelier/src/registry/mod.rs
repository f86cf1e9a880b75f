//! Orchestration registry: the synchronized store of truth
//!
//! Concurrency-safe storage and lookup for all projects and tasks. Each
//! entity lives in its own `DashMap` entry, so every operation holds a
//! fine-grained per-entity lock for the duration of a single read or
//! write only. Reads hand out clones, never live references, so callers
//! cannot mutate state outside the registry's control.
//!
//! Executor units mutate task state exclusively through
//! [`Registry::apply_task_progress`], which enforces the task state
//! machine and progress monotonicity under the task's entry lock.

use std::sync::{RwLock, Weak};

use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    NewProject, NewTask, Project, ProjectStatusReport, Task, TaskStatus, TaskUpdate,
};

mod error;

pub use error::RegistryError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Hook through which the registry requests cancellation of a running
/// task's executor unit before removing the record
pub trait TaskCanceller: Send + Sync {
    /// Signal the executor unit for `task_id` to stop at its next
    /// checkpoint; must be idempotent and non-blocking
    fn request_cancel(&self, task_id: Uuid);
}

/// In-memory store of all projects and tasks
pub struct Registry {
    projects: DashMap<Uuid, Project>,
    tasks: DashMap<Uuid, Task>,
    canceller: RwLock<Option<Weak<dyn TaskCanceller>>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            projects: DashMap::new(),
            tasks: DashMap::new(),
            canceller: RwLock::new(None),
        }
    }

    /// Attach the executor-side cancellation hook
    ///
    /// Held weakly so the registry and executor can reference each other
    /// without a cycle; both live for the process lifetime anyway.
    pub fn set_canceller(&self, canceller: Weak<dyn TaskCanceller>) {
        if let Ok(mut slot) = self.canceller.write() {
            *slot = Some(canceller);
        }
    }

    fn request_cancel(&self, task_id: Uuid) {
        let hook = match self.canceller.read() {
            Ok(slot) => slot.as_ref().and_then(Weak::upgrade),
            Err(_) => None,
        };
        if let Some(hook) = hook {
            hook.request_cancel(task_id);
        }
    }

    /// Create a project with an empty task list
    pub fn create_project(&self, spec: NewProject) -> RegistryResult<Project> {
        validate_required(&spec.name, "name")?;
        validate_required(&spec.description, "description")?;

        let project = Project::new(spec);
        self.projects.insert(project.id, project.clone());
        tracing::info!("Created project {}", project.id);
        Ok(project)
    }

    /// Fetch a snapshot of a project
    pub fn get_project(&self, project_id: Uuid) -> RegistryResult<Project> {
        self.projects
            .get(&project_id)
            .map(|p| p.clone())
            .ok_or(RegistryError::ProjectNotFound(project_id))
    }

    /// Snapshot of all projects in creation order
    pub fn list_projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.iter().map(|p| p.clone()).collect();
        projects.sort_by_key(|p| p.created_at);
        projects
    }

    /// Delete a project, cascading to its owned tasks
    ///
    /// Running tasks are signalled to cancel before their records are
    /// removed; once this returns no executor write can land for them.
    pub fn delete_project(&self, project_id: Uuid) -> RegistryResult<()> {
        let (_, project) = self
            .projects
            .remove(&project_id)
            .ok_or(RegistryError::ProjectNotFound(project_id))?;

        for task_id in project.task_ids {
            if let Some((_, task)) = self.tasks.remove(&task_id) {
                if task.status == TaskStatus::Running {
                    self.request_cancel(task.id);
                }
            }
        }
        tracing::info!("Deleted project {}", project_id);
        Ok(())
    }

    /// Create a task under a project; the task starts pending at progress 0
    pub fn create_task(&self, project_id: Uuid, spec: NewTask) -> RegistryResult<Task> {
        validate_required(&spec.name, "name")?;
        validate_required(&spec.description, "description")?;

        let mut project = self
            .projects
            .get_mut(&project_id)
            .ok_or(RegistryError::ProjectNotFound(project_id))?;

        let task = Task::new(project_id, spec);
        project.task_ids.push(task.id);
        project.updated_at = task.created_at;
        self.tasks.insert(task.id, task.clone());
        tracing::info!("Created task {} in project {}", task.id, project_id);
        Ok(task)
    }

    /// Fetch a snapshot of a task
    pub fn get_task(&self, task_id: Uuid) -> RegistryResult<Task> {
        self.tasks
            .get(&task_id)
            .map(|t| t.clone())
            .ok_or(RegistryError::TaskNotFound(task_id))
    }

    /// Snapshot of a project's tasks in creation order
    pub fn get_tasks(&self, project_id: Uuid) -> RegistryResult<Vec<Task>> {
        let task_ids = self
            .projects
            .get(&project_id)
            .map(|p| p.task_ids.clone())
            .ok_or(RegistryError::ProjectNotFound(project_id))?;

        Ok(task_ids
            .iter()
            .filter_map(|id| self.tasks.get(id).map(|t| t.clone()))
            .collect())
    }

    /// Merge a metadata update into a task
    ///
    /// Rejected with `Conflict` while the task is running, since the
    /// executor owns the live fields and updates must not race its writes.
    pub fn update_task(&self, task_id: Uuid, update: TaskUpdate) -> RegistryResult<Task> {
        let mut task = self
            .tasks
            .get_mut(&task_id)
            .ok_or(RegistryError::TaskNotFound(task_id))?;

        if task.status == TaskStatus::Running {
            return Err(RegistryError::Conflict(format!(
                "task {} is running and cannot be updated",
                task_id
            )));
        }

        task.apply_update(update);
        tracing::info!("Updated task {}", task_id);
        Ok(task.clone())
    }

    /// Delete a task, removing it from its project's ordered list
    ///
    /// A running task is signalled to cancel first; its record is removed
    /// immediately, so any in-flight executor write fails `TaskNotFound`
    /// and the driver stops. No write lands after this returns.
    pub fn delete_task(&self, task_id: Uuid) -> RegistryResult<()> {
        let (_, task) = self
            .tasks
            .remove(&task_id)
            .ok_or(RegistryError::TaskNotFound(task_id))?;

        if task.status == TaskStatus::Running {
            self.request_cancel(task_id);
        }

        if let Some(mut project) = self.projects.get_mut(&task.project_id) {
            project.task_ids.retain(|id| *id != task_id);
            project.updated_at = chrono::Utc::now();
        }
        tracing::info!("Deleted task {}", task_id);
        Ok(())
    }

    /// Compute the aggregate status report for a project
    pub fn project_status(&self, project_id: Uuid) -> RegistryResult<ProjectStatusReport> {
        let tasks = self.get_tasks(project_id)?;
        Ok(ProjectStatusReport::from_tasks(&tasks))
    }

    /// Apply an executor progress report to a task
    ///
    /// The only mutation path executor units may use. Enforces, under the
    /// task's entry lock: a valid state transition, monotonically
    /// non-decreasing progress, running progress below 100, and the
    /// `progress == 100 iff completed` invariant. Failed tasks keep their
    /// last reported progress; failed and cancelled tasks drop their
    /// current phase.
    pub fn apply_task_progress(
        &self,
        task_id: Uuid,
        progress: u8,
        phase: Option<String>,
        status: TaskStatus,
    ) -> RegistryResult<Task> {
        let mut task = self
            .tasks
            .get_mut(&task_id)
            .ok_or(RegistryError::TaskNotFound(task_id))?;

        if !task.status.can_transition_to(status) {
            return Err(RegistryError::InvalidTransition {
                from: task.status,
                to: status,
            });
        }

        match status {
            TaskStatus::Running => {
                if progress < task.progress {
                    return Err(RegistryError::Validation(format!(
                        "progress may not decrease ({} -> {})",
                        task.progress, progress
                    )));
                }
                if progress > 99 {
                    return Err(RegistryError::Validation(
                        "running progress must stay below 100".to_string(),
                    ));
                }
                task.progress = progress;
                if phase.is_some() {
                    task.current_phase = phase;
                }
            }
            TaskStatus::Completed => {
                task.progress = 100;
                if phase.is_some() {
                    task.current_phase = phase;
                }
            }
            TaskStatus::Failed | TaskStatus::Cancelled => {
                // progress stays at its last reported value
                task.current_phase = None;
            }
            TaskStatus::Pending => {
                // unreachable through the state machine, nothing transitions to pending
            }
        }

        task.status = status;
        task.updated_at = chrono::Utc::now();
        tracing::debug!(
            "Task {} -> {} ({}%, phase {:?})",
            task_id,
            status,
            task.progress,
            task.current_phase
        );
        Ok(task.clone())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_required(value: &str, field: &str) -> RegistryResult<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::Validation(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}
