//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command category.

use clap::Args;

// Friend command arguments
#[derive(Args)]
pub struct AddFriendArgs {
    /// First name
    pub first_name: String,

    /// Last name
    #[arg(default_value = "")]
    pub last_name: String,

    /// Target contact frequency (daily, every-3-days, weekly, biweekly, monthly,
    /// bimonthly, quarterly, biannually, yearly, or a day count)
    #[arg(long, short)]
    pub frequency: Option<String>,

    /// Initial notes
    #[arg(long, short)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ListFriendsArgs {
    /// Sort order (least-recent, most-recent, fewest-contacts, most-contacts)
    #[arg(long, short, default_value = "least-recent")]
    pub sort: String,

    /// Only show friends that are overdue for contact
    #[arg(long)]
    pub overdue: bool,

    /// Only show friends carrying this tag (name or id)
    #[arg(long, short)]
    pub tag: Option<String>,
}

#[derive(Args)]
pub struct FriendIdArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,
}

#[derive(Args)]
pub struct RenameFriendArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// New first name
    pub first_name: String,

    /// New last name
    #[arg(default_value = "")]
    pub last_name: String,
}

#[derive(Args)]
pub struct NotesArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// Replacement notes (empty clears them)
    pub notes: String,
}

#[derive(Args)]
pub struct FrequencyArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// New target frequency
    pub frequency: String,
}

#[derive(Args)]
pub struct AvatarArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// Image URI; omit to clear the avatar
    pub uri: Option<String>,
}

// Contact command arguments
#[derive(Args)]
pub struct LogContactArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// Date of the contact (YYYY-MM-DD, "today" or "yesterday"); defaults to today
    #[arg(long, short)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct RemoveContactArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// Date of the contact to remove (YYYY-MM-DD)
    pub date: String,
}

// Tag command arguments
#[derive(Args)]
pub struct AddTagArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// Tag name; an existing tag with this name is reused
    pub name: String,

    /// Color for a new tag (e.g. "#f97316"); random when omitted
    #[arg(long, short)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct RemoveTagArgs {
    /// Friend ID (or unambiguous prefix)
    pub id: String,

    /// Tag name or id
    pub tag: String,
}

// Group command arguments
#[derive(Args)]
pub struct GroupNameArgs {
    /// Group name
    pub name: String,
}

#[derive(Args)]
pub struct GroupMemberArgs {
    /// Group name
    pub group: String,

    /// Friend ID (or unambiguous prefix)
    pub friend: String,
}

#[derive(Args)]
pub struct ListGroupsArgs {
    /// Show member names
    #[arg(long, short)]
    pub members: bool,
}

// Reminder arguments
#[derive(Args)]
pub struct RemindersArgs {
    /// Only show reminders whose time has come
    #[arg(long)]
    pub due: bool,

    /// Remove due reminders from the ledger after showing them
    #[arg(long, requires = "due")]
    pub dismiss: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation check
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}
