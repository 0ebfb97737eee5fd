//! The notification delivery seam.

use async_trait::async_trait;
use std::fmt::Debug;

/// Errors reported by a notification service.
///
/// These never escape a registry operation: the scheduler logs them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("Failed to schedule notification: {0}")]
    Schedule(String),

    #[error("Failed to cancel notification {handle}: {reason}")]
    Cancel { handle: String, reason: String },

    #[error("Notification backend unavailable: {0}")]
    Unavailable(String),
}

/// Something that can fire a one-shot notification in the future.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationService: Send + Sync + Debug {
    /// Schedule a notification `delay_seconds` from now and return its handle.
    async fn schedule_one_shot(
        &self,
        delay_seconds: u64,
        title: String,
        body: String,
    ) -> Result<String, NotificationError>;

    /// Cancel a previously scheduled notification.
    async fn cancel(&self, handle: &str) -> Result<(), NotificationError>;
}
