//! Snapshot persistence
//!
//! Every entity kind is stored as one JSON array under a fixed key and is
//! rewritten in full on every mutation.
//!
//! ## Storage Implementations
//!
//! - **JsonFileStore**: one `<key>.json` file per collection under the data directory
//! - **MemorySnapshotStore**: process-local map, for testing and ephemeral sessions

pub mod collection;
pub mod errors;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use collection::SnapshotCollection;
pub use errors::{StorageError, StorageResult};
pub use json_file::JsonFileStore;
pub use memory::MemorySnapshotStore;
pub use traits::SnapshotStore;

use crate::config::{RapportConfig, StorageBackend};
use std::sync::Arc;

/// Key of the friend collection
pub const FRIEND_LIST_KEY: &str = "friendList";

/// Key of the group collection
pub const GROUP_LIST_KEY: &str = "groupList";

/// Key of the pending-notification ledger
pub const NOTIFICATION_LEDGER_KEY: &str = "notificationLedger";

/// Create the snapshot store selected by the configuration
pub fn create_snapshot_store(config: &RapportConfig) -> StorageResult<Arc<dyn SnapshotStore>> {
    match config.storage.backend {
        StorageBackend::JsonFile => {
            if config.storage.data_dir.as_os_str().is_empty() {
                return Err(StorageError::Configuration(
                    "Data directory cannot be empty".to_string(),
                ));
            }
            tracing::debug!(
                "Using JSON file store at {}",
                config.storage.data_dir.display()
            );
            Ok(Arc::new(JsonFileStore::new(&config.storage.data_dir)))
        }
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory snapshot store");
            Ok(Arc::new(MemorySnapshotStore::new()))
        }
    }
}
