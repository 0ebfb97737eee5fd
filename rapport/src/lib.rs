//! # Rapport
//!
//! Contact tracking and reminder scheduling for the people you want to keep in
//! touch with. Rapport keeps an ordered, date-keyed contact history per friend,
//! derives a continuous staleness signal from it, and keeps exactly one one-shot
//! reminder armed per friend as contacts are logged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rapport::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new().with_memory_storage().build()?;
//!     let rapport = rapport::init(config).await?;
//!
//!     let friend = rapport.registry().add_friend(Name::new("Ada", "Lovelace")).await?;
//!     rapport.registry().log_contact_now(&friend.id).await?;
//!
//!     for friend in rapport.registry().sorted(Some(SortKey::LeastRecentContactFirst)).await {
//!         println!("{} overdue={}", friend.name, friend.is_overdue(rapport.today()));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **models**: `Friend`, `ContactHistory`, `ContactFrequency`, `Tag`, `Group`
//! - **sorting**: stable comparators selectable by `SortKey`
//! - **reminders**: `ReminderScheduler` over a pluggable `NotificationService`
//! - **registry**: `RelationshipRegistry`, the single source of truth for a session
//! - **storage**: whole-collection snapshot persistence (JSON file or memory)
//! - **groups**: the group directory that friend deletion cascades into

pub mod app;
pub mod clock;
pub mod config;
pub mod groups;
pub mod logging;
pub mod models;
pub mod registry;
pub mod reminders;
pub mod sorting;
pub mod storage;

pub use app::{Rapport, init, init_with_defaults};

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::app::{Rapport, init, init_with_defaults};
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::{ConfigBuilder, LogLevel, RapportConfig, StorageBackend};
    pub use crate::groups::{GroupDirectory, GroupMembership};
    pub use crate::models::{
        ContactError, ContactFrequency, ContactHistory, ContactStatus, Friend, Group, Name, Tag,
    };
    pub use crate::registry::RelationshipRegistry;
    pub use crate::reminders::{
        NotificationLedger, NotificationService, ReminderCategory, ReminderMessage,
        ReminderRequest, ReminderScheduler, SelectionStrategy,
    };
    pub use crate::sorting::SortKey;
    pub use crate::storage::{StorageError, SnapshotStore};
    pub use crate::{RapportError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Rapport operations
#[derive(Debug, thiserror::Error)]
pub enum RapportError {
    /// No friend (or group) with the given identifier
    #[error("Not found: {id}")]
    NotFound { id: String },

    /// A contact was already logged on this calendar date
    #[error("A contact is already recorded on {date}")]
    DuplicateContact { date: chrono::NaiveDate },

    /// Backdated contact lies in the future
    #[error("Contact date {date} is in the future")]
    FutureDate { date: chrono::NaiveDate },

    /// Undo requested on an empty contact history
    #[error("Friend {id} has no contacts to undo")]
    NoContacts { id: String },

    /// The collection could not be durably saved or loaded
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Invalid input that is not tied to a contact date
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for RapportError {
    fn from(err: crate::config::ConfigError) -> Self {
        RapportError::Configuration(err.to_string())
    }
}

impl From<crate::models::ContactError> for RapportError {
    fn from(err: crate::models::ContactError) -> Self {
        match err {
            crate::models::ContactError::Duplicate(date) => RapportError::DuplicateContact { date },
            crate::models::ContactError::FutureDate(date) => RapportError::FutureDate { date },
        }
    }
}

/// Result type for Rapport operations
pub type Result<T> = std::result::Result<T, RapportError>;
