//! Reminder message pools and selection.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title and body of a single reminder notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMessage {
    pub title: String,
    pub body: String,
}

impl ReminderMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Which pool a reminder draws its message from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    /// "It has been a while" nudges, armed after every logged contact
    #[default]
    #[serde(alias = "reminder-to-reconnect")]
    Reconnect,

    /// Suggestions to meet up in person
    #[serde(alias = "hangout-suggestion")]
    HangoutSuggestion,
}

impl ReminderCategory {
    pub const ALL: [ReminderCategory; 2] = [
        ReminderCategory::Reconnect,
        ReminderCategory::HangoutSuggestion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderCategory::Reconnect => "reminder-to-reconnect",
            ReminderCategory::HangoutSuggestion => "hangout-suggestion",
        }
    }

    /// All messages of this category addressed to `first_name`.
    ///
    /// Never empty.
    pub fn pool(&self, first_name: &str) -> Vec<ReminderMessage> {
        let n = first_name;
        match self {
            ReminderCategory::Reconnect => vec![
                ReminderMessage::new("Check in with a friend", format!("You haven't talked to {n} in a while.")),
                ReminderMessage::new("Send a quick text", format!("What has {n} been up to lately? Ask them.")),
                ReminderMessage::new("A month already", format!("A month has gone by since you last reached {n}.")),
                ReminderMessage::new("Say hello", format!("{n} would probably like to hear from you today.")),
                ReminderMessage::new("Keep in touch", format!("Drop {n} a line before another week slips by.")),
                ReminderMessage::new("Catch up", format!("It's a good day to catch up with {n}.")),
                ReminderMessage::new("Stay close", format!("A short message keeps you and {n} close.")),
                ReminderMessage::new("Thinking of someone?", format!("{n} might be thinking of you too. Reach out.")),
            ],
            ReminderCategory::HangoutSuggestion => vec![
                ReminderMessage::new("Grab a coffee", format!("Ask {n} if they're free for a coffee this week.")),
                ReminderMessage::new("Plan something", format!("How about a walk or a meal with {n}?")),
                ReminderMessage::new("Meet up", format!("It's been too long since you saw {n} in person.")),
                ReminderMessage::new("Weekend plans?", format!("See if {n} wants to do something this weekend.")),
                ReminderMessage::new("Try something new", format!("Pick a new spot and invite {n} along.")),
            ],
        }
    }
}

impl fmt::Display for ReminderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reconnect" | "reminder-to-reconnect" => Ok(ReminderCategory::Reconnect),
            "hangout" | "hangout-suggestion" | "hangout_suggestion" => {
                Ok(ReminderCategory::HangoutSuggestion)
            }
            _ => Err(format!("Unknown reminder category: {}", s)),
        }
    }
}

/// How a message is picked from a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// Uniformly random entry
    #[default]
    Random,

    /// Always the first entry
    First,
}

impl SelectionStrategy {
    pub fn select(&self, pool: &[ReminderMessage]) -> Option<ReminderMessage> {
        match self {
            SelectionStrategy::Random if !pool.is_empty() => {
                let index = rand::rng().random_range(0..pool.len());
                pool.get(index).cloned()
            }
            _ => pool.first().cloned(),
        }
    }
}

impl FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(SelectionStrategy::Random),
            "first" => Ok(SelectionStrategy::First),
            _ => Err(format!("Unknown selection strategy: {}", s)),
        }
    }
}
