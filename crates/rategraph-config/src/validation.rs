//! Custom validation functions for configuration values

use validator::ValidationError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accept plain levels plus EnvFilter directives like `rategraph_store=debug`
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LEVELS.contains(&level.to_ascii_lowercase().as_str()) || level.contains('=') {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
