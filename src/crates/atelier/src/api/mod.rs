//! REST API layer for the orchestration service
//!
//! Provides the HTTP gateway over the registry and executor:
//! - Project CRUD and aggregate status
//! - Task CRUD, start, and status polling
//! - Health check
//!
//! Success payloads are wrapped as `{ "success": true, "data": ... }`;
//! errors use a non-200 status with the failure reason in the body.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use middleware::cors_layer;
pub use response::{ErrorResponse, SuccessResponse};
pub use routes::{create_router, AppState};
