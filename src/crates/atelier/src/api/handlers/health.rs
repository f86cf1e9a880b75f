//! Health check endpoint handler

use crate::api::models::HealthResponse;
use crate::api::response;

/// Handler for GET /health
pub async fn health() -> impl axum::response::IntoResponse {
    response::ok(HealthResponse::now("ok"))
}
