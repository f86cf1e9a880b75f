//! Request validation utilities

use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};

/// Validate that a required string field is not empty
pub fn validate_not_empty(value: &str, field_name: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Validate string length constraints
pub fn validate_string_length(
    value: &str,
    field_name: &str,
    min: usize,
    max: usize,
) -> ApiResult<()> {
    if value.len() < min || value.len() > max {
        return Err(ApiError::ValidationError(format!(
            "{} must be between {} and {} characters",
            field_name, min, max
        )));
    }
    Ok(())
}

/// Validate and parse a path id
pub fn validate_uuid(value: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| ApiError::ValidationError(format!("Invalid id: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_empty_accepts_text() {
        assert!(validate_not_empty("hello", "name").is_ok());
    }

    #[test]
    fn not_empty_rejects_blank() {
        assert!(validate_not_empty("", "name").is_err());
        assert!(validate_not_empty("   ", "name").is_err());
    }

    #[test]
    fn string_length_bounds() {
        assert!(validate_string_length("hello", "name", 1, 10).is_ok());
        assert!(validate_string_length("hi", "name", 5, 10).is_err());
        assert!(validate_string_length("very long string", "name", 1, 5).is_err());
    }

    #[test]
    fn uuid_parsing() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
