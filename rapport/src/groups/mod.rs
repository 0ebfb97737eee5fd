//! Group Directory
//!
//! Named groups of friends. Groups reference friends by id, so deleting a
//! friend only has to strip that id from every group.

use crate::models::Group;
use crate::storage::{GROUP_LIST_KEY, SnapshotCollection, SnapshotStore};
use crate::{RapportError, Result};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// The part of group management the relationship registry depends on
#[async_trait]
pub trait GroupMembership: Send + Sync + Debug {
    /// Remove the friend from every group; returns how many groups changed.
    async fn remove_relationship_everywhere(&self, friend_id: &str) -> Result<usize>;
}

/// Snapshot-backed collection of groups
#[derive(Clone, Debug)]
pub struct GroupDirectory {
    groups: Arc<RwLock<Vec<Group>>>,
    snapshot: SnapshotCollection<Group>,
    /// Held from the in-memory change through the save
    saving: Arc<Mutex<()>>,
}

impl GroupDirectory {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            groups: Arc::new(RwLock::new(Vec::new())),
            snapshot: SnapshotCollection::new(store, GROUP_LIST_KEY),
            saving: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the in-memory groups with the stored snapshot
    pub async fn refresh(&self) -> Result<usize> {
        let stored = self.snapshot.load().await?;
        let count = stored.len();
        *self.groups.write().await = stored;
        tracing::debug!(count, "Groups loaded");
        Ok(count)
    }

    /// Create an empty group. Names are trimmed and must be unique.
    pub async fn create(&self, name: &str) -> Result<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RapportError::Validation(
                "Group name cannot be empty".to_string(),
            ));
        }

        let mut groups = self.groups.write().await;
        if groups.iter().any(|g| g.name == name) {
            return Err(RapportError::Validation(format!(
                "Group already exists: {}",
                name
            )));
        }

        let group = Group::new(name);
        groups.push(group.clone());
        let snapshot = groups.clone();
        let _saving = self.saving.lock().await;
        drop(groups); // Release lock before persisting

        self.persist(&snapshot).await?;
        tracing::info!(group = %name, "Group created");
        Ok(group)
    }

    pub async fn delete(&self, name: &str) -> Result<Group> {
        let mut groups = self.groups.write().await;
        let Some(index) = groups.iter().position(|g| g.name == name) else {
            return Err(RapportError::NotFound {
                id: name.to_string(),
            });
        };

        let removed = groups.remove(index);
        let snapshot = groups.clone();
        let _saving = self.saving.lock().await;
        drop(groups);

        self.persist(&snapshot).await?;
        tracing::info!(group = %name, "Group deleted");
        Ok(removed)
    }

    /// Add a friend to a group. Adding an existing member is a no-op.
    pub async fn add_member(&self, name: &str, friend_id: &str) -> Result<bool> {
        self.update(name, |group| group.add_member(friend_id)).await
    }

    pub async fn remove_member(&self, name: &str, friend_id: &str) -> Result<bool> {
        self.update(name, |group| group.remove_member(friend_id))
            .await
    }

    pub async fn set_photo(&self, name: &str, uri: Option<String>) -> Result<()> {
        self.update(name, move |group| {
            group.photo_uri = uri;
            true
        })
        .await
        .map(|_| ())
    }

    pub async fn list(&self) -> Vec<Group> {
        self.groups.read().await.clone()
    }

    pub async fn find(&self, name: &str) -> Option<Group> {
        self.groups
            .read()
            .await
            .iter()
            .find(|g| g.name == name)
            .cloned()
    }

    /// Groups the friend belongs to
    pub async fn groups_for(&self, friend_id: &str) -> Vec<Group> {
        self.groups
            .read()
            .await
            .iter()
            .filter(|g| g.has_member(friend_id))
            .cloned()
            .collect()
    }

    /// Apply `change` to the named group, persisting when it reports a change
    async fn update<F>(&self, name: &str, change: F) -> Result<bool>
    where
        F: FnOnce(&mut Group) -> bool,
    {
        let mut groups = self.groups.write().await;
        let Some(group) = groups.iter_mut().find(|g| g.name == name) else {
            return Err(RapportError::NotFound {
                id: name.to_string(),
            });
        };

        if !change(group) {
            return Ok(false);
        }
        let snapshot = groups.clone();
        let _saving = self.saving.lock().await;
        drop(groups);

        self.persist(&snapshot).await?;
        Ok(true)
    }

    async fn persist(&self, groups: &[Group]) -> Result<()> {
        self.snapshot.save(groups).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist groups");
            RapportError::from(e)
        })
    }
}

#[async_trait]
impl GroupMembership for GroupDirectory {
    async fn remove_relationship_everywhere(&self, friend_id: &str) -> Result<usize> {
        let mut groups = self.groups.write().await;
        let changed = groups
            .iter_mut()
            .map(|group| group.remove_member(friend_id))
            .filter(|removed| *removed)
            .count();
        if changed == 0 {
            return Ok(0);
        }
        let snapshot = groups.clone();
        let _saving = self.saving.lock().await;
        drop(groups);

        self.persist(&snapshot).await?;
        tracing::debug!(friend_id, groups = changed, "Removed friend from groups");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySnapshotStore;

    fn directory() -> (GroupDirectory, Arc<MemorySnapshotStore>) {
        let store = Arc::new(MemorySnapshotStore::new());
        (GroupDirectory::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_validates_names() {
        let (groups, _) = directory();
        groups.create("  Climbing  ").await.unwrap();

        assert!(matches!(
            groups.create("Climbing").await,
            Err(RapportError::Validation(_))
        ));
        assert!(matches!(
            groups.create("   ").await,
            Err(RapportError::Validation(_))
        ));
        assert!(groups.find("Climbing").await.is_some());
    }

    #[tokio::test]
    async fn test_membership_is_idempotent() {
        let (groups, _) = directory();
        groups.create("Work").await.unwrap();

        assert!(groups.add_member("Work", "f-1").await.unwrap());
        assert!(!groups.add_member("Work", "f-1").await.unwrap());
        assert_eq!(groups.find("Work").await.unwrap().member_ids, vec!["f-1"]);

        assert!(matches!(
            groups.add_member("Nope", "f-1").await,
            Err(RapportError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_everywhere_and_reload() {
        let (groups, store) = directory();
        for name in ["Work", "Climbing", "Family"] {
            groups.create(name).await.unwrap();
        }
        groups.add_member("Work", "f-1").await.unwrap();
        groups.add_member("Climbing", "f-1").await.unwrap();
        groups.add_member("Climbing", "f-2").await.unwrap();

        assert_eq!(groups.groups_for("f-1").await.len(), 2);
        assert_eq!(groups.remove_relationship_everywhere("f-1").await.unwrap(), 2);
        assert!(groups.groups_for("f-1").await.is_empty());
        assert_eq!(groups.remove_relationship_everywhere("f-1").await.unwrap(), 0);

        let reloaded = GroupDirectory::new(store);
        assert_eq!(reloaded.refresh().await.unwrap(), 3);
        assert_eq!(
            reloaded.find("Climbing").await.unwrap().member_ids,
            vec!["f-2"]
        );
    }

    #[tokio::test]
    async fn test_delete_and_photo() {
        let (groups, _) = directory();
        groups.create("Book club").await.unwrap();
        groups
            .set_photo("Book club", Some("file:///club.png".to_string()))
            .await
            .unwrap();
        assert_eq!(
            groups.find("Book club").await.unwrap().photo_uri.as_deref(),
            Some("file:///club.png")
        );

        groups.delete("Book club").await.unwrap();
        assert!(groups.list().await.is_empty());
        assert!(groups.delete("Book club").await.is_err());
    }
}
