//! Relationship Registry
//!
//! The authoritative in-memory collection of friends for a session. Every
//! mutation goes through here so that the contact history, the friend's armed
//! reminder and the persisted snapshot move together.
//!
//! Mutations hold the write lock for the in-memory change (and any reminder
//! re-arm), then release it and save the full collection. Each save is queued
//! before the lock is released, so snapshots land in mutation order. A failed
//! save is reported to the caller but the in-memory change is kept, so a read
//! right after a write always observes that write.

use crate::clock::Clock;
use crate::groups::GroupMembership;
use crate::models::{ContactFrequency, Friend, Name, Tag};
use crate::reminders::{ReminderCategory, ReminderRequest, ReminderScheduler};
use crate::sorting::{self, SortKey};
use crate::storage::{FRIEND_LIST_KEY, SnapshotCollection, SnapshotStore};
use crate::{RapportError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Days until the reminder armed after a logged contact fires
pub const DEFAULT_REMINDER_DELAY_DAYS: u32 = 30;

/// Thread-safe owner of the friend collection
#[derive(Clone)]
pub struct RelationshipRegistry {
    friends: Arc<RwLock<Vec<Friend>>>,
    snapshot: SnapshotCollection<Friend>,
    scheduler: ReminderScheduler,
    groups: Arc<dyn GroupMembership>,
    clock: Arc<dyn Clock>,
    /// Armed after every logged contact; `None` disables reminders
    reminder: Option<ReminderRequest>,
    /// Taken under the write lock and held through the save, so snapshots
    /// reach the store in mutation order
    saving: Arc<Mutex<()>>,
}

impl RelationshipRegistry {
    /// Create an empty registry. Call [`refresh`](Self::refresh) to load the
    /// stored collection.
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        scheduler: ReminderScheduler,
        groups: Arc<dyn GroupMembership>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            friends: Arc::new(RwLock::new(Vec::new())),
            snapshot: SnapshotCollection::new(store, FRIEND_LIST_KEY),
            scheduler,
            groups,
            clock,
            reminder: Some(ReminderRequest::new(
                DEFAULT_REMINDER_DELAY_DAYS,
                ReminderCategory::Reconnect,
            )),
            saving: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the reminder policy applied after logged contacts
    pub fn with_reminder_policy(mut self, request: Option<ReminderRequest>) -> Self {
        self.reminder = request;
        self
    }

    pub fn reminder_policy(&self) -> Option<&ReminderRequest> {
        self.reminder.as_ref()
    }

    /// Today's date according to the registry clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Replace the in-memory collection with the stored snapshot
    pub async fn refresh(&self) -> Result<usize> {
        let stored = self.snapshot.load().await?;
        let count = stored.len();
        *self.friends.write().await = stored;
        tracing::info!(count, "Friends loaded");
        Ok(count)
    }

    /// Create a friend with an empty history and the monthly target
    pub async fn add_friend(&self, name: Name) -> Result<Friend> {
        if name.is_blank() {
            return Err(RapportError::Validation(
                "Friend name cannot be empty".to_string(),
            ));
        }
        self.insert_friend(Friend::new(name)).await
    }

    /// Insert a fully formed friend, e.g. one restored from an export
    pub async fn insert_friend(&self, friend: Friend) -> Result<Friend> {
        let mut friends = self.friends.write().await;
        if friends.iter().any(|f| f.id == friend.id) {
            return Err(RapportError::Validation(format!(
                "Friend already exists: {}",
                friend.id
            )));
        }

        friends.push(friend.clone());
        let snapshot = friends.clone();
        let _saving = self.saving.lock().await;
        drop(friends); // Release lock before persisting

        tracing::info!(friend_id = %friend.id, name = %friend.name, "Friend added");
        self.persist(&snapshot).await?;
        Ok(friend)
    }

    pub async fn find(&self, id: &str) -> Option<Friend> {
        self.friends.read().await.iter().find(|f| f.id == id).cloned()
    }

    /// All friends in insertion order
    pub async fn friends(&self) -> Vec<Friend> {
        self.friends.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.friends.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.friends.read().await.is_empty()
    }

    /// A sorted copy of the collection; `None` uses the default key
    pub async fn sorted(&self, key: Option<SortKey>) -> Vec<Friend> {
        sorting::sort_friends(&self.friends.read().await, key)
    }

    /// Friends whose contact gap has reached their target
    pub async fn overdue(&self) -> Vec<Friend> {
        let today = self.today();
        sorting::filter_overdue(&self.friends.read().await, today)
    }

    pub async fn with_tag(&self, tag_id: &str) -> Vec<Friend> {
        sorting::filter_by_tag(&self.friends.read().await, tag_id)
    }

    /// Record a contact today and re-arm the friend's reminder.
    pub async fn log_contact_now(&self, id: &str) -> Result<Friend> {
        let today = self.today();
        self.log_contact(id, today, |friend| {
            if friend.push_contact(today) {
                Ok(())
            } else {
                Err(RapportError::DuplicateContact { date: today })
            }
        })
        .await
    }

    /// Record a contact on a past (or today's) date and re-arm the reminder.
    pub async fn log_contact_on(&self, id: &str, date: NaiveDate) -> Result<Friend> {
        let today = self.today();
        self.log_contact(id, date, |friend| {
            friend.add_contact(date, today).map_err(RapportError::from)
        })
        .await
    }

    async fn log_contact<F>(&self, id: &str, date: NaiveDate, record: F) -> Result<Friend>
    where
        F: FnOnce(&mut Friend) -> Result<()>,
    {
        let mut friends = self.friends.write().await;
        let friend = find_mut(&mut friends, id)?;

        record(&mut *friend)?;
        tracing::debug!(friend_id = %id, %date, "Contact logged");

        if let Some(request) = &self.reminder {
            self.scheduler.rearm(friend, request).await;
        }

        let updated = friend.clone();
        let snapshot = friends.clone();
        let _saving = self.saving.lock().await;
        drop(friends);

        self.persist(&snapshot).await?;
        Ok(updated)
    }

    /// Remove the most recent contact. The armed reminder is left alone.
    pub async fn undo_last_contact(&self, id: &str) -> Result<NaiveDate> {
        self.mutate(id, |friend| {
            friend
                .remove_last_contact()
                .ok_or_else(|| RapportError::NoContacts { id: id.to_string() })
        })
        .await
    }

    /// Remove a specific contact date; returns whether it was present.
    /// The armed reminder is left alone.
    pub async fn remove_contact_on(&self, id: &str, date: NaiveDate) -> Result<bool> {
        self.mutate(id, |friend| Ok(friend.remove_contact(date)))
            .await
    }

    /// Delete a friend: cancel its reminder, strip it from every group, drop
    /// it from the collection and persist.
    pub async fn remove_relationship(&self, id: &str) -> Result<Friend> {
        let mut friends = self.friends.write().await;
        let index = friends
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| RapportError::NotFound { id: id.to_string() })?;

        self.scheduler.cancel(&mut friends[index]).await;

        let groups_result = self.groups.remove_relationship_everywhere(id).await;
        if let Err(e) = &groups_result {
            tracing::error!(friend_id = %id, error = %e, "Failed to remove friend from groups");
        }

        let removed = friends.remove(index);
        let snapshot = friends.clone();
        let _saving = self.saving.lock().await;
        drop(friends);

        tracing::info!(friend_id = %id, name = %removed.name, "Friend removed");
        self.persist(&snapshot).await?;
        groups_result?;
        Ok(removed)
    }

    pub async fn set_contact_frequency(
        &self,
        id: &str,
        frequency: ContactFrequency,
    ) -> Result<Friend> {
        self.mutate(id, |friend| {
            friend.set_contact_frequency(frequency);
            Ok(friend.clone())
        })
        .await
    }

    pub async fn set_notes(&self, id: &str, notes: &str) -> Result<Friend> {
        self.mutate(id, |friend| {
            friend.set_notes(notes);
            Ok(friend.clone())
        })
        .await
    }

    /// Attach a tag. Returns `false` if a tag with the same id is present.
    pub async fn add_tag(&self, id: &str, tag: Tag) -> Result<bool> {
        self.mutate(id, |friend| Ok(friend.add_tag(tag))).await
    }

    pub async fn remove_tag(&self, id: &str, tag_id: &str) -> Result<bool> {
        self.mutate(id, |friend| Ok(friend.remove_tag(tag_id)))
            .await
    }

    /// Set or clear the profile photo reference
    pub async fn set_avatar(&self, id: &str, uri: Option<String>) -> Result<Friend> {
        self.mutate(id, |friend| {
            friend.profile_photo_uri = uri;
            Ok(friend.clone())
        })
        .await
    }

    pub async fn rename(&self, id: &str, name: Name) -> Result<Friend> {
        if name.is_blank() {
            return Err(RapportError::Validation(
                "Friend name cannot be empty".to_string(),
            ));
        }
        self.mutate(id, |friend| {
            friend.rename(name);
            Ok(friend.clone())
        })
        .await
    }

    /// Every distinct tag (by id) carried by any friend, first occurrence wins
    pub async fn all_tags_in_use(&self) -> Vec<Tag> {
        let friends = self.friends.read().await;
        let mut seen = HashSet::new();
        friends
            .iter()
            .flat_map(|f| f.tags.iter())
            .filter(|tag| seen.insert(tag.id.clone()))
            .cloned()
            .collect()
    }

    /// Cancel every reminder, empty the collection and drop the snapshot
    pub async fn clear(&self) -> Result<usize> {
        let mut friends = self.friends.write().await;
        for friend in friends.iter_mut() {
            self.scheduler.cancel(friend).await;
        }
        let count = friends.len();
        friends.clear();
        let _saving = self.saving.lock().await;
        drop(friends);

        self.snapshot.clear().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to remove friend snapshot");
            RapportError::from(e)
        })?;
        tracing::info!(count, "Friends cleared");
        Ok(count)
    }

    /// Apply `change` to one friend and persist on success
    async fn mutate<R, F>(&self, id: &str, change: F) -> Result<R>
    where
        F: FnOnce(&mut Friend) -> Result<R>,
    {
        let mut friends = self.friends.write().await;
        let friend = find_mut(&mut friends, id)?;
        let result = change(friend)?;
        let snapshot = friends.clone();
        let _saving = self.saving.lock().await;
        drop(friends);

        tracing::debug!(friend_id = %id, "Friend updated");
        self.persist(&snapshot).await?;
        Ok(result)
    }

    async fn persist(&self, friends: &[Friend]) -> Result<()> {
        self.snapshot.save(friends).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist friends");
            RapportError::from(e)
        })
    }
}

fn find_mut<'a>(friends: &'a mut [Friend], id: &str) -> Result<&'a mut Friend> {
    friends
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| RapportError::NotFound { id: id.to_string() })
}

impl fmt::Debug for RelationshipRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationshipRegistry")
            .field("snapshot", &self.snapshot)
            .field("reminder", &self.reminder)
            .finish_non_exhaustive()
    }
}
