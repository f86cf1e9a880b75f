//! Task executor: concurrent per-task phase drivers
//!
//! `start` spawns one independent tokio task (a "driver") per started
//! task, so one task's slowness or failure never blocks another. Drivers
//! communicate every mutation back through
//! [`Registry::apply_task_progress`] and never touch task state directly.
//!
//! Cancellation is cooperative: a per-task `watch` flag is checked at
//! every phase boundary. The registry only records `cancelled` when the
//! driver itself acknowledges the flag by writing the terminal state.
//! If the task record disappears mid-flight (deleted), the driver's next
//! write fails `TaskNotFound` and the driver stops silently.

use std::sync::{Arc, Weak};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::{Task, TaskStatus};
use crate::registry::{Registry, RegistryError, RegistryResult, TaskCanceller};

mod worker;

pub use worker::{PhaseWorker, SimulatedWorker, WorkerError, DEFAULT_PHASES};

/// Cancellation handle for one live driver
struct RunningTask {
    cancel: watch::Sender<bool>,
}

/// Drives tasks from `pending` to a terminal state, one driver per task
pub struct Executor {
    registry: Arc<Registry>,
    worker: Arc<dyn PhaseWorker>,
    running: Arc<DashMap<Uuid, RunningTask>>,
}

impl Executor {
    /// Create an executor and attach it as the registry's cancellation hook
    pub fn new(registry: Arc<Registry>, worker: Arc<dyn PhaseWorker>) -> Arc<Self> {
        let executor = Arc::new(Self {
            registry,
            worker,
            running: Arc::new(DashMap::new()),
        });
        let hook: Weak<dyn TaskCanceller> = Arc::downgrade(&executor) as Weak<dyn TaskCanceller>;
        executor.registry.set_canceller(hook);
        executor
    }

    /// Begin asynchronous execution of a pending task
    ///
    /// Transitions the task to `running` and returns immediately after
    /// spawning the driver; never blocks on task completion. Starting a
    /// task that is already running or terminal is a `Conflict`.
    pub fn start(&self, task_id: Uuid) -> RegistryResult<()> {
        let task = self.registry.get_task(task_id)?;

        match self.running.entry(task_id) {
            Entry::Occupied(_) => Err(RegistryError::Conflict(format!(
                "task {} is already running",
                task_id
            ))),
            Entry::Vacant(slot) => {
                if task.status != TaskStatus::Pending {
                    return Err(RegistryError::Conflict(format!(
                        "task {} is {} and cannot be started",
                        task_id, task.status
                    )));
                }

                let task =
                    self.registry
                        .apply_task_progress(task_id, 0, None, TaskStatus::Running)?;

                let (cancel_tx, cancel_rx) = watch::channel(false);
                slot.insert(RunningTask { cancel: cancel_tx });

                tokio::spawn(drive(
                    self.registry.clone(),
                    self.worker.clone(),
                    self.running.clone(),
                    task,
                    cancel_rx,
                ));

                tracing::info!("Started task {}", task_id);
                Ok(())
            }
        }
    }

    /// Start every pending task in a project
    ///
    /// `Conflict` if any of the project's tasks is already running.
    /// Terminal tasks are skipped; each started task gets its own
    /// independent driver. Returns the number of drivers spawned.
    pub fn start_project(&self, project_id: Uuid) -> RegistryResult<usize> {
        let tasks = self.registry.get_tasks(project_id)?;
        if tasks.iter().any(|t| t.status == TaskStatus::Running) {
            return Err(RegistryError::Conflict(format!(
                "project {} is already running",
                project_id
            )));
        }

        let mut started = 0;
        for task in tasks {
            if task.status != TaskStatus::Pending {
                continue;
            }
            match self.start(task.id) {
                Ok(()) => started += 1,
                Err(err) if err.is_not_found() => {
                    tracing::debug!("Task {} deleted before start, skipping", task.id);
                }
                Err(RegistryError::Conflict(_)) => {
                    tracing::debug!("Task {} raced another starter, skipping", task.id);
                }
                Err(err) => return Err(err),
            }
        }
        tracing::info!("Started {} tasks in project {}", started, project_id);
        Ok(started)
    }

    /// Request cooperative cancellation of a running task
    ///
    /// Idempotent and non-blocking: flips the driver's flag if one is
    /// live, no-op for pending or terminal tasks. The driver acknowledges
    /// at its next phase boundary.
    pub fn cancel(&self, task_id: Uuid) {
        if let Some(running) = self.running.get(&task_id) {
            let _ = running.cancel.send(true);
            tracing::info!("Requested cancellation of task {}", task_id);
        }
    }

    /// Whether a driver is currently live for the task
    pub fn is_running(&self, task_id: Uuid) -> bool {
        self.running.contains_key(&task_id)
    }
}

impl TaskCanceller for Executor {
    fn request_cancel(&self, task_id: Uuid) {
        self.cancel(task_id);
    }
}

/// One task's driver: walks the worker's phase plan, reporting progress
/// after each phase and checking the cancellation flag at every boundary.
async fn drive(
    registry: Arc<Registry>,
    worker: Arc<dyn PhaseWorker>,
    running: Arc<DashMap<Uuid, RunningTask>>,
    task: Task,
    cancel: watch::Receiver<bool>,
) {
    let task_id = task.id;
    let phases = worker.phases(&task);
    let total = phases.len().max(1);

    for (index, phase) in phases.iter().enumerate() {
        if *cancel.borrow() {
            running.remove(&task_id);
            report_terminal(&registry, task_id, TaskStatus::Cancelled, None);
            return;
        }

        if let Err(err) = worker.run_phase(&task, phase).await {
            tracing::warn!("Task {} failed: {}", task_id, err);
            running.remove(&task_id);
            report_terminal(&registry, task_id, TaskStatus::Failed, None);
            return;
        }

        // running progress is capped below 100; completion alone reports 100
        let progress = (((index + 1) * 100 / total) as u8).min(99);
        match registry.apply_task_progress(
            task_id,
            progress,
            Some(phase.clone()),
            TaskStatus::Running,
        ) {
            Ok(_) => {}
            Err(err) if err.is_not_found() => {
                tracing::debug!("Task {} deleted mid-flight, driver stopping", task_id);
                running.remove(&task_id);
                return;
            }
            Err(err) => {
                tracing::warn!("Dropping progress report for task {}: {}", task_id, err);
                running.remove(&task_id);
                return;
            }
        }
    }

    // deregister before the terminal write so observers never see a
    // terminal task with a live driver
    running.remove(&task_id);
    if *cancel.borrow() {
        report_terminal(&registry, task_id, TaskStatus::Cancelled, None);
    } else {
        report_terminal(
            &registry,
            task_id,
            TaskStatus::Completed,
            Some("finished".to_string()),
        );
    }
}

fn report_terminal(registry: &Registry, task_id: Uuid, status: TaskStatus, phase: Option<String>) {
    match registry.apply_task_progress(task_id, 0, phase, status) {
        Ok(task) => {
            tracing::info!("Task {} finished as {}", task_id, task.status);
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!("Task {} already deleted, skipping {} report", task_id, status);
        }
        Err(err) => {
            tracing::warn!("Failed to record {} for task {}: {}", status, task_id, err);
        }
    }
}
