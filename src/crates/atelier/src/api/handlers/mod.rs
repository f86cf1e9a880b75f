//! API endpoint handlers

pub mod health;
pub mod projects;
pub mod tasks;

pub use health::health;
pub use projects::{
    create_project, create_task, delete_project, get_project, get_project_status,
    get_project_tasks, list_projects, start_project,
};
pub use tasks::{delete_task, get_task, get_task_status, start_task, update_task};
