//! CORS layer configuration
//!
//! The service is polled by browser frontends during development, so the
//! gateway accepts any origin, method, and header.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer for the API router
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
