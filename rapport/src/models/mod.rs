//! Domain model: friends, their contact history and the data attached to them.

pub mod contact_history;
pub mod frequency;
pub mod friend;
pub mod group;
pub mod name;
pub mod tag;

pub use contact_history::{ContactError, ContactHistory};
pub use frequency::ContactFrequency;
pub use friend::{ContactStatus, Friend};
pub use group::Group;
pub use name::Name;
pub use tag::{TAG_PALETTE, Tag};
