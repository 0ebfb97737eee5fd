//! Command handlers for the Rapport CLI

pub mod contact;
pub mod friend;
pub mod group;
pub mod reminder;
pub mod tag;

pub use contact::handle_contact_command;
pub use friend::handle_friend_command;
pub use group::handle_group_command;
pub use reminder::handle_reminders_command;
pub use tag::handle_tag_command;
