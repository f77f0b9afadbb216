//! Configuration validation

use super::SecurityConfig;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for SecurityConfig {
    fn validate(&self) -> Result<(), String> {
        if self.global_group.trim().is_empty() {
            return Err("global_group must not be empty".to_string());
        }
        if self.global_group.trim() != self.global_group {
            return Err("global_group must not have surrounding whitespace".to_string());
        }
        Ok(())
    }
}
