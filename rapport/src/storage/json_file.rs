//! Directory-backed snapshot store: one `<key>.json` file per collection.

use super::errors::StorageError;
use super::traits::SnapshotStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StorageError::Configuration(format!(
                "Invalid snapshot key: '{}'",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Operation(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write(&self, key: &str, payload: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        // Write aside then rename so a crash never leaves a truncated snapshot.
        // Staging names are unique per write so concurrent writers never share one.
        let staging = self
            .root
            .join(format!(".{}.{}.json.tmp", key, Uuid::new_v4().simple()));
        tokio::fs::write(&staging, payload.as_bytes())
            .await
            .map_err(|e| {
                StorageError::Operation(format!("Failed to write {}: {}", staging.display(), e))
            })?;
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(StorageError::Operation(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> Result<bool, StorageError> {
        let probe = self.root.join(".health");
        if tokio::fs::create_dir_all(&self.root).await.is_err() {
            return Ok(false);
        }
        if tokio::fs::write(&probe, b"ok").await.is_err() {
            return Ok(false);
        }
        Ok(tokio::fs::remove_file(&probe).await.is_ok())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        Ok(serde_json::json!({
            "type": "json_file",
            "root": self.root.display().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip_and_remove() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        assert_eq!(store.read("friendList").await.unwrap(), None);
        store
            .write("friendList", "[]".to_string())
            .await
            .unwrap();
        assert!(dir.path().join("nested").join("friendList.json").exists());
        assert_eq!(
            store.read("friendList").await.unwrap().as_deref(),
            Some("[]")
        );

        store.remove("friendList").await.unwrap();
        store.remove("friendList").await.unwrap();
        assert_eq!(store.read("friendList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.write("../escape", "[]".to_string()).await.is_err());
        assert!(store.read("").await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_writes_to_one_key() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let writes = (0..8).map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.write("friendList", format!("[{}]", i)).await })
        });
        for handle in writes.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }

        let payload = store.read("friendList").await.unwrap().unwrap();
        assert!(payload.starts_with('[') && payload.ends_with(']'));

        // No staging files are left behind
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.health_check().await.unwrap());
    }
}
