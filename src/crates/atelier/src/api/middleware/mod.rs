//! API middleware: CORS and request validation helpers

pub mod cors;
pub mod validation;

pub use cors::cors_layer;
