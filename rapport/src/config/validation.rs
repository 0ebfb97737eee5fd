//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &RapportConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_reminder_config(&config.reminders)?;
    Ok(())
}

/// Validate storage configuration.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    match config.backend {
        StorageBackend::JsonFile => {
            if config.data_dir.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Data directory cannot be empty".to_string(),
                ));
            }
        }
        StorageBackend::Memory => {
            // Nothing touches the filesystem
        }
    }

    Ok(())
}

/// Validate reminder configuration.
fn validate_reminder_config(config: &ReminderConfig) -> Result<(), ConfigError> {
    if config.delay_days == 0 {
        return Err(ConfigError::ValidationError(
            "Reminder delay_days must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
