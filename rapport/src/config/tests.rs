use crate::config::{
    ConfigBuilder, ConfigLoader, LogFormat, LogLevel, RapportConfig, StorageBackend, validation,
};
use crate::reminders::{ReminderCategory, SelectionStrategy};
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = RapportConfig::default();
    assert_eq!(config.storage.backend, StorageBackend::JsonFile);
    assert!(!config.storage.data_dir.as_os_str().is_empty());
    assert!(config.reminders.enabled);
    assert_eq!(config.reminders.delay_days, 30);
    assert_eq!(config.reminders.category, ReminderCategory::Reconnect);
    assert_eq!(config.reminders.selection, SelectionStrategy::Random);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_config_builder() {
    let config = ConfigBuilder::new()
        .with_data_dir("/tmp/test_data")
        .with_reminder_delay_days(14)
        .with_reminder_category(ReminderCategory::HangoutSuggestion)
        .with_message_selection(SelectionStrategy::First)
        .with_log_level(LogLevel::Debug)
        .with_log_format(LogFormat::Json)
        .build()
        .unwrap();

    assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/test_data"));
    assert_eq!(config.reminders.delay_days, 14);
    assert_eq!(
        config.reminders.category,
        ReminderCategory::HangoutSuggestion
    );
    assert_eq!(config.reminders.selection, SelectionStrategy::First);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_config_builder_with_memory() {
    let config = ConfigBuilder::new()
        .with_memory_storage()
        .with_reminders_enabled(false)
        .build()
        .unwrap();

    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert!(!config.reminders.enabled);
}

#[test]
fn test_validation() {
    assert!(ConfigBuilder::new().build().is_ok());
    assert!(validation::validate_config(&RapportConfig::default()).is_ok());

    let zero_delay = ConfigBuilder::new().with_reminder_delay_days(0).build();
    assert!(zero_delay.is_err());

    let no_dir = ConfigBuilder::new().with_data_dir("").build();
    assert!(no_dir.is_err());

    // An empty data_dir is irrelevant once nothing touches the filesystem
    let memory = ConfigBuilder::new()
        .with_data_dir("")
        .with_memory_storage()
        .build();
    assert!(memory.is_ok());
}

#[test]
fn test_config_serialization() {
    let config = ConfigBuilder::new()
        .with_data_dir("/tmp/test_data")
        .with_reminder_category(ReminderCategory::HangoutSuggestion)
        .build()
        .unwrap();

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["storage"]["backend"], "json_file");
    assert_eq!(json["reminders"]["category"], "hangout_suggestion");

    let deserialized: RapportConfig = serde_json::from_value(json).unwrap();
    assert_eq!(config.storage.data_dir, deserialized.storage.data_dir);
    assert_eq!(config.reminders.category, deserialized.reminders.category);
}

#[test]
fn test_loader_file_then_env() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "rapport.toml",
            r#"
                [storage]
                backend = "memory"

                [reminders]
                delay_days = 7
                selection = "first"
            "#,
        )?;
        jail.set_env("RAPPORT_REMINDERS__DELAY_DAYS", "21");
        jail.set_env("RAPPORT_LOGGING__LEVEL", "warn");

        let config = ConfigLoader::new()
            .load_default_files()
            .load_env()
            .extract()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.reminders.delay_days, 21);
        assert_eq!(config.reminders.selection, SelectionStrategy::First);
        assert_eq!(config.logging.level, LogLevel::Warn);
        Ok(())
    });
}

#[test]
fn test_loader_rejects_invalid_values() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("RAPPORT_REMINDERS__DELAY_DAYS", "0");
        let result = ConfigLoader::new().load_env().extract();
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn test_loader_missing_file() {
    let mut loader = ConfigLoader::new();
    assert!(loader.load_file("/definitely/not/here.toml").is_err());
}
