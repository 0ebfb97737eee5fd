//! A [`NotificationService`] that records pending reminders in a snapshot store.
//!
//! The ledger is the delivery backend for environments without an OS
//! notification center (the CLI): reminders are written down with the instant
//! they should fire, and a front end lists whatever is due.

use super::service::{NotificationError, NotificationService};
use crate::clock::Clock;
use crate::storage::{NOTIFICATION_LEDGER_KEY, SnapshotCollection, SnapshotStore};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A one-shot notification waiting to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

impl PendingNotification {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.fire_at <= now
    }
}

pub struct NotificationLedger {
    entries: SnapshotCollection<PendingNotification>,
    clock: Arc<dyn Clock>,
    // Serializes load-modify-save cycles
    lock: Mutex<()>,
}

impl NotificationLedger {
    pub fn new(store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: SnapshotCollection::new(store, NOTIFICATION_LEDGER_KEY),
            clock,
            lock: Mutex::new(()),
        }
    }

    /// All pending notifications, soonest first.
    pub async fn pending(&self) -> Result<Vec<PendingNotification>, NotificationError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.sort_by_key(|entry| entry.fire_at);
        Ok(entries)
    }

    /// Pending notifications whose fire time has passed.
    pub async fn due(&self) -> Result<Vec<PendingNotification>, NotificationError> {
        let now = self.clock.now();
        Ok(self
            .pending()
            .await?
            .into_iter()
            .filter(|entry| entry.is_due(now))
            .collect())
    }

    /// Drop every due notification from the ledger and return them.
    pub async fn take_due(&self) -> Result<Vec<PendingNotification>, NotificationError> {
        let _guard = self.lock.lock().await;
        let now = self.clock.now();
        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .load()
            .await?
            .into_iter()
            .partition(|entry| entry.is_due(now));
        if !due.is_empty() {
            self.save(&rest).await?;
        }
        due.sort_by_key(|entry| entry.fire_at);
        Ok(due)
    }

    async fn load(&self) -> Result<Vec<PendingNotification>, NotificationError> {
        self.entries
            .load()
            .await
            .map_err(|e| NotificationError::Unavailable(e.to_string()))
    }

    async fn save(&self, entries: &[PendingNotification]) -> Result<(), NotificationError> {
        self.entries
            .save(entries)
            .await
            .map_err(|e| NotificationError::Unavailable(e.to_string()))
    }
}

impl fmt::Debug for NotificationLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationLedger")
            .field("key", &self.entries.key())
            .finish()
    }
}

#[async_trait]
impl NotificationService for NotificationLedger {
    async fn schedule_one_shot(
        &self,
        delay_seconds: u64,
        title: String,
        body: String,
    ) -> Result<String, NotificationError> {
        let delay = i64::try_from(delay_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                NotificationError::Schedule(format!("Delay out of range: {}s", delay_seconds))
            })?;

        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let entry = PendingNotification {
            id: Uuid::new_v4().to_string(),
            fire_at: self.clock.now() + delay,
            title,
            body,
        };
        let id = entry.id.clone();
        entries.push(entry);
        self.save(&entries).await?;

        tracing::debug!(handle = %id, delay_seconds, "Notification recorded");
        Ok(id)
    }

    async fn cancel(&self, handle: &str) -> Result<(), NotificationError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        entries.retain(|entry| entry.id != handle);
        if entries.len() == before {
            return Err(NotificationError::Cancel {
                handle: handle.to_string(),
                reason: "not scheduled".to_string(),
            });
        }
        self.save(&entries).await
    }
}
