//! Worker seam for the generation capability behind task execution
//!
//! The executor is agnostic about what a phase actually does; it only
//! asks the worker for a phase plan and runs the phases in order. The
//! real generation backend plugs in behind [`PhaseWorker`]; the shipped
//! [`SimulatedWorker`] walks the standard build phases with a
//! configurable delay.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Task;

/// Errors surfaced by a worker while executing a phase
///
/// Worker failures never propagate to API callers; the executor records
/// them as the task's `failed` status.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// A phase errored mid-flight
    #[error("phase {phase} failed: {message}")]
    PhaseFailed {
        /// Phase that errored
        phase: String,
        /// Failure detail
        message: String,
    },
}

/// The opaque external capability that performs a task's phases
#[async_trait]
pub trait PhaseWorker: Send + Sync {
    /// Ordered phase plan for the given task
    fn phases(&self, task: &Task) -> Vec<String>;

    /// Execute a single phase to completion
    async fn run_phase(&self, task: &Task, phase: &str) -> Result<(), WorkerError>;
}

/// Standard build phases walked for every task
pub const DEFAULT_PHASES: [&str; 10] = [
    "DemandAnalysis",
    "LanguageChoose",
    "Coding",
    "ArtDesign",
    "ArtIntegration",
    "CodeComplete",
    "CodeReviewComment",
    "CodeReviewModification",
    "TestErrorSummary",
    "TestModification",
];

/// Stand-in worker that sleeps through each phase
#[derive(Debug, Clone)]
pub struct SimulatedWorker {
    phase_delay: Duration,
}

impl SimulatedWorker {
    /// Create a simulated worker with the given per-phase delay
    pub fn new(phase_delay: Duration) -> Self {
        Self { phase_delay }
    }
}

impl Default for SimulatedWorker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl PhaseWorker for SimulatedWorker {
    fn phases(&self, _task: &Task) -> Vec<String> {
        DEFAULT_PHASES.iter().map(|p| (*p).to_string()).collect()
    }

    async fn run_phase(&self, task: &Task, phase: &str) -> Result<(), WorkerError> {
        tokio::time::sleep(self.phase_delay).await;
        tracing::debug!("Task {}: finished phase {}", task.id, phase);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use uuid::Uuid;

    #[tokio::test]
    async fn simulated_worker_walks_all_phases() {
        let worker = SimulatedWorker::new(Duration::from_millis(1));
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

        let phases = worker.phases(&task);
        assert_eq!(phases.len(), DEFAULT_PHASES.len());
        assert_eq!(phases[0], "DemandAnalysis");

        for phase in &phases {
            worker.run_phase(&task, phase).await.unwrap();
        }
    }
}
