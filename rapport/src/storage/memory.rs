//! In-memory snapshot store for tests and ephemeral sessions

use super::errors::StorageError;
use super::traits::SnapshotStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write and remove fail, simulating a full or
    /// revoked backing store
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Operation("store is read-only".to_string()));
        }
        Ok(())
    }

    fn poisoned<E>(_: E) -> StorageError {
        StorageError::Other("snapshot map lock poisoned".to_string())
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let snapshots = self.snapshots.read().map_err(Self::poisoned)?;
        Ok(snapshots.get(key).cloned())
    }

    async fn write(&self, key: &str, payload: String) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut snapshots = self.snapshots.write().map_err(Self::poisoned)?;
        snapshots.insert(key.to_string(), payload);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut snapshots = self.snapshots.write().map_err(Self::poisoned)?;
        snapshots.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(!self.read_only.load(Ordering::SeqCst))
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        let snapshots = self.snapshots.read().map_err(Self::poisoned)?;
        let mut keys: Vec<&String> = snapshots.keys().collect();
        keys.sort();
        Ok(serde_json::json!({
            "type": "memory",
            "keys": keys,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_only_rejects_writes() {
        let store = MemorySnapshotStore::new();
        store.write("k", "[]".to_string()).await.unwrap();
        store.set_read_only(true);

        assert!(store.write("k", "[1]".to_string()).await.is_err());
        assert!(store.remove("k").await.is_err());
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("[]"));
        assert!(!store.health_check().await.unwrap());
    }
}
