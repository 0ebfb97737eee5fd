//! One-shot reminder scheduling.
//!
//! - **messages**: categorized message pools and selection strategies
//! - **service**: the `NotificationService` delivery seam
//! - **ledger**: a snapshot-backed `NotificationService`
//! - **scheduler**: `ReminderScheduler`, which keeps at most one reminder armed per friend

pub mod ledger;
pub mod messages;
pub mod scheduler;
pub mod service;

pub use ledger::{NotificationLedger, PendingNotification};
pub use messages::{ReminderCategory, ReminderMessage, SelectionStrategy};
pub use scheduler::{ReminderRequest, ReminderScheduler};
pub use service::{NotificationError, NotificationService};

#[cfg(test)]
pub use service::MockNotificationService;
