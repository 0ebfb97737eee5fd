//! Top-level handle wiring storage, reminders, groups and the registry together.

use crate::clock::{Clock, SystemClock};
use crate::config::{self, RapportConfig};
use crate::groups::GroupDirectory;
use crate::logging;
use crate::registry::RelationshipRegistry;
use crate::reminders::{NotificationLedger, ReminderRequest, ReminderScheduler};
use crate::storage::{self, SnapshotStore};
use crate::{RapportError, Result};
use chrono::NaiveDate;
use std::sync::Arc;

/// A loaded Rapport session
#[derive(Debug, Clone)]
pub struct Rapport {
    config: RapportConfig,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    registry: RelationshipRegistry,
    groups: GroupDirectory,
    notifications: Arc<NotificationLedger>,
}

impl Rapport {
    /// Build a session on an explicit store and clock and load both
    /// collections. Logging is left untouched.
    pub async fn open(
        config: RapportConfig,
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config::validation::validate_config(&config)?;

        let notifications = Arc::new(NotificationLedger::new(store.clone(), clock.clone()));
        let scheduler = ReminderScheduler::new(notifications.clone())
            .with_selection(config.reminders.selection);
        let groups = GroupDirectory::new(store.clone());
        let policy = config
            .reminders
            .enabled
            .then(|| ReminderRequest::from(&config.reminders));
        let registry = RelationshipRegistry::new(
            store.clone(),
            scheduler,
            Arc::new(groups.clone()),
            clock.clone(),
        )
        .with_reminder_policy(policy);

        groups.refresh().await?;
        registry.refresh().await?;

        Ok(Self {
            config,
            store,
            clock,
            registry,
            groups,
            notifications,
        })
    }

    pub fn config(&self) -> &RapportConfig {
        &self.config
    }

    pub fn registry(&self) -> &RelationshipRegistry {
        &self.registry
    }

    pub fn groups(&self) -> &GroupDirectory {
        &self.groups
    }

    /// Pending reminders recorded by this session's notification backend
    pub fn notifications(&self) -> &NotificationLedger {
        &self.notifications
    }

    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether the snapshot store is usable
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }
}

/// Initialize Rapport with default configuration
pub async fn init_with_defaults() -> Result<Rapport> {
    let config = config::ConfigBuilder::defaults().build()?;
    init(config).await
}

/// Initialize logging and open a session with the configured snapshot store
/// and the system clock.
pub async fn init(config: RapportConfig) -> Result<Rapport> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    let store = storage::create_snapshot_store(&config).map_err(RapportError::from)?;
    let rapport = Rapport::open(config, store, Arc::new(SystemClock)).await?;

    tracing::info!(
        friends = rapport.registry.len().await,
        groups = rapport.groups.list().await.len(),
        "Rapport initialized"
    );
    Ok(rapport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ConfigBuilder;
    use crate::models::Name;
    use crate::storage::MemorySnapshotStore;

    #[tokio::test]
    async fn test_logged_contact_lands_in_ledger() {
        let config = ConfigBuilder::new()
            .with_memory_storage()
            .with_reminder_delay_days(14)
            .build()
            .unwrap();
        let clock = Arc::new(ManualClock::at_date(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        ));
        let rapport = Rapport::open(config, Arc::new(MemorySnapshotStore::new()), clock.clone())
            .await
            .unwrap();

        let ada = rapport
            .registry()
            .add_friend(Name::new("Ada", "Lovelace"))
            .await
            .unwrap();
        let ada = rapport.registry().log_contact_now(&ada.id).await.unwrap();

        let pending = rapport.notifications().pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(Some(&pending[0].id), ada.notification_id.as_ref());
        assert_eq!(pending[0].fire_at, clock.now() + chrono::Duration::days(14));
        assert!(pending[0].body.contains("Ada"));

        rapport.registry().remove_relationship(&ada.id).await.unwrap();
        assert!(rapport.notifications().pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_reminders() {
        let config = ConfigBuilder::new()
            .with_memory_storage()
            .with_reminders_enabled(false)
            .build()
            .unwrap();
        let rapport = init(config).await.unwrap();
        assert!(rapport.registry().reminder_policy().is_none());
        assert!(rapport.health_check().await);
    }
}
