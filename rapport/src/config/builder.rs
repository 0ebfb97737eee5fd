//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::reminders::{ReminderCategory, SelectionStrategy};
use std::path::{Path, PathBuf};

/// Builder for creating RapportConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: RapportConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: RapportConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: RapportConfig) -> Self {
        Self { config }
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Persist snapshots as JSON files under the data directory.
    pub fn with_file_storage(mut self) -> Self {
        if self.config.storage.data_dir.as_os_str().is_empty() {
            self.config.storage.data_dir = PathBuf::from("./data");
        }
        self.config.storage.backend = StorageBackend::JsonFile;
        self
    }

    /// Keep snapshots in memory only (good for testing)
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.backend = StorageBackend::Memory;
        self
    }

    /// Enable or disable reminder arming on contact logging.
    pub fn with_reminders_enabled(mut self, enabled: bool) -> Self {
        self.config.reminders.enabled = enabled;
        self
    }

    /// Days between a logged contact and its reminder.
    pub fn with_reminder_delay_days(mut self, days: u32) -> Self {
        self.config.reminders.delay_days = days;
        self
    }

    /// Message pool used for reminders.
    pub fn with_reminder_category(mut self, category: ReminderCategory) -> Self {
        self.config.reminders.category = category;
        self
    }

    /// Message selection strategy.
    pub fn with_message_selection(mut self, selection: SelectionStrategy) -> Self {
        self.config.reminders.selection = selection;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Set the log file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Configure whether to log to stdout.
    pub fn with_stdout_logging(mut self, enabled: bool) -> Self {
        self.config.logging.stdout = enabled;
        self
    }

    /// Use default logging configuration
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging = LoggingConfig::default();
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<RapportConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }

    /// Create a builder with default settings for all components.
    pub fn defaults() -> Self {
        Self::new().with_file_storage().with_default_logging()
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
