//! Command enum definitions
//!
//! This module contains all CLI command enums that define the command structure.

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Run diagnostic checks
    Diagnose,

    /// Manage the people you keep in touch with
    #[command(subcommand)]
    Friend(FriendCommands),

    /// Log, undo and remove contacts
    #[command(subcommand)]
    Contact(ContactCommands),

    /// Tag friends
    #[command(subcommand)]
    Tag(TagCommands),

    /// Manage groups of friends
    #[command(subcommand)]
    Group(GroupCommands),

    /// Show pending reminders
    #[command(alias = "reminder")]
    Reminders(RemindersArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),

    /// Delete every friend and cancel their reminders
    Clear(ClearArgs),
}

#[derive(Subcommand)]
pub enum FriendCommands {
    /// Add a new friend
    #[command(
        long_about = r#"
Add a new friend with an empty contact history.

New friends start with a monthly contact target and are immediately overdue
until a first contact is logged.

EXAMPLES:
  rapport-cli friend add Ada Lovelace
  rapport-cli friend add Grace --frequency weekly --notes "met at the conference"
"#
    )]
    Add(AddFriendArgs),

    /// List friends with their contact status
    #[command(alias = "ls")]
    List(ListFriendsArgs),

    /// Show one friend in detail
    #[command(alias = "get")]
    Show(FriendIdArgs),

    /// Delete a friend, removing them from all groups and cancelling their reminder
    #[command(alias = "delete")]
    Remove(FriendIdArgs),

    /// Change a friend's name
    Rename(RenameFriendArgs),

    /// Replace a friend's notes
    Notes(NotesArgs),

    /// Change how often you want to be in touch
    Frequency(FrequencyArgs),

    /// Set or clear a friend's profile photo
    Avatar(AvatarArgs),
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Log a contact (today, or a past date) and re-arm the reminder
    #[command(
        long_about = r#"
Log that you were in touch with a friend.

Without --date the contact is recorded for today. A date may be backdated but
never in the future, and each calendar date can be logged only once. Logging a
contact replaces the friend's pending reminder with a fresh one.

EXAMPLES:
  rapport-cli contact log 3f2a
  rapport-cli contact log 3f2a --date 2024-01-05
"#
    )]
    Log(LogContactArgs),

    /// Remove the most recent contact
    Undo(FriendIdArgs),

    /// Remove the contact logged on a specific date
    Remove(RemoveContactArgs),
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Tag a friend
    Add(AddTagArgs),

    /// Remove a tag from a friend
    Remove(RemoveTagArgs),

    /// List every tag in use
    List,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create an empty group
    Create(GroupNameArgs),

    /// Delete a group (its members are kept)
    Delete(GroupNameArgs),

    /// Add a friend to a group
    Add(GroupMemberArgs),

    /// Remove a friend from a group
    Remove(GroupMemberArgs),

    /// List groups
    List(ListGroupsArgs),
}
