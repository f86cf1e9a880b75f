//! Project and task orchestration service
//!
//! atelier accepts project and task definitions over HTTP, schedules
//! task execution on independent concurrent drivers, tracks multi-phase
//! progress, and reports aggregate project status.
//!
//! Architecture, leaves first:
//! - [`domain`]: project/task entities and the task state machine
//! - [`registry`]: the synchronized in-memory store of truth
//! - [`executor`]: per-task phase drivers with cooperative cancellation
//! - [`api`]: the axum HTTP gateway
//! - [`config`]: TOML server configuration

pub mod api;
pub mod config;
pub mod domain;
pub mod executor;
pub mod registry;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
