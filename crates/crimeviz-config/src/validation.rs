//! Custom validation helpers for configuration values

use validator::ValidationError;

/// Validate a log level string
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Error attached to a section whose start year exceeds its end year
pub fn year_order_error() -> ValidationError {
    ValidationError::new("start_year_after_end_year")
}
