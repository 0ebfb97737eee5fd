//! Configuration system for Rapport.
//!
//! Configuration is layered: built-in defaults, then the first config file
//! found, then `RAPPORT_*` environment variables. Nested keys use a double
//! underscore, e.g. `RAPPORT_REMINDERS__DELAY_DAYS=14`.

mod builder;
mod loader;
mod models;
#[cfg(test)]
mod tests;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use loader::{ConfigLoader, load_config};
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "rapport.toml",
    "rapport.yaml",
    "rapport.yml",
    "rapport.json",
    ".rapport/config.toml",
    ".rapport/config.yaml",
    ".rapport/config.yml",
    ".rapport/config.json",
];

/// Environment variable prefix for Rapport configuration
pub const ENV_PREFIX: &str = "RAPPORT_";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),

}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
