//! Domain entities for the orchestration service
//!
//! Projects own ordered collections of tasks; tasks carry their own
//! lifecycle state machine and progress. Aggregate project status is
//! always derived from the tasks, never stored.

pub mod project;
pub mod task;

pub use project::{NewProject, Project, ProjectStatus, ProjectStatusReport};
pub use task::{NewTask, Task, TaskStatus, TaskUpdate};
