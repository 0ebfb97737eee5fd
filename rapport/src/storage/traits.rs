//! Trait definitions for snapshot persistence

use async_trait::async_trait;
use std::fmt::Debug;

use crate::storage::errors::StorageError;

/// A key-value blob store holding one whole-collection snapshot per key.
///
/// Implementations overwrite the full payload on every write; there is no
/// incremental update.
#[async_trait]
pub trait SnapshotStore: Send + Sync + 'static + Debug {
    /// Read the payload stored under `key`, `None` if nothing was ever written
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored under `key`
    async fn write(&self, key: &str, payload: String) -> Result<(), StorageError>;

    /// Remove the payload stored under `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Check that the store can be written to
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Describe the backend
    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError>;
}
