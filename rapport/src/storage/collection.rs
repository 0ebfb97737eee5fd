//! Typed whole-collection access on top of a [`SnapshotStore`].

use super::errors::{StorageError, StorageResult};
use super::traits::SnapshotStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Saves and loads a `Vec<T>` as a JSON array under a fixed key.
pub struct SnapshotCollection<T> {
    store: Arc<dyn SnapshotStore>,
    key: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> SnapshotCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn SnapshotStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _item: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    /// Overwrite the stored snapshot with `items`
    pub async fn save(&self, items: &[T]) -> StorageResult<()> {
        let payload = serde_json::to_string(items)?;
        self.store.write(self.key, payload).await?;
        tracing::debug!(key = self.key, count = items.len(), "Snapshot saved");
        Ok(())
    }

    /// Load the stored snapshot. Nothing stored yields an empty collection.
    pub async fn load(&self) -> StorageResult<Vec<T>> {
        let Some(payload) = self.store.read(self.key).await? else {
            tracing::debug!(key = self.key, "No snapshot stored, starting empty");
            return Ok(Vec::new());
        };

        let value: serde_json::Value =
            serde_json::from_str(&payload).map_err(|e| StorageError::Corrupted {
                key: self.key.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_array() {
            return Err(StorageError::Corrupted {
                key: self.key.to_string(),
                reason: "expected a JSON array".to_string(),
            });
        }

        let items: Vec<T> = serde_json::from_value(value)?;
        tracing::debug!(key = self.key, count = items.len(), "Snapshot loaded");
        Ok(items)
    }

    /// Drop the stored snapshot entirely
    pub async fn clear(&self) -> StorageResult<()> {
        self.store.remove(self.key).await
    }
}

impl<T> Clone for SnapshotCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SnapshotCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCollection")
            .field("key", &self.key)
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySnapshotStore;

    #[tokio::test]
    async fn test_missing_snapshot_is_empty() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let collection = SnapshotCollection::<String>::new(store, "things");
        assert!(collection.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let collection = SnapshotCollection::<String>::new(store, "things");
        collection
            .save(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(collection.load().await.unwrap(), vec!["a", "b"]);

        collection.clear().await.unwrap();
        assert!(collection.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_payload_is_corrupted() {
        let store = Arc::new(MemorySnapshotStore::new());
        store
            .write("things", r#"{"not": "a list"}"#.to_string())
            .await
            .unwrap();
        let collection = SnapshotCollection::<String>::new(store, "things");

        match collection.load().await {
            Err(StorageError::Corrupted { key, .. }) => assert_eq!(key, "things"),
            other => panic!("expected corrupted snapshot, got {:?}", other),
        }
    }
}
