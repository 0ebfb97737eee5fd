//! Contact-frequency targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Desired maximum number of days between two contacts.
///
/// Persisted as the plain day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ContactFrequency {
    Daily,
    EveryThreeDays,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Bimonthly,
    Quarterly,
    Biannually,
    Yearly,
}

impl ContactFrequency {
    /// Every supported target, shortest first
    pub const ALL: [ContactFrequency; 9] = [
        ContactFrequency::Daily,
        ContactFrequency::EveryThreeDays,
        ContactFrequency::Weekly,
        ContactFrequency::Biweekly,
        ContactFrequency::Monthly,
        ContactFrequency::Bimonthly,
        ContactFrequency::Quarterly,
        ContactFrequency::Biannually,
        ContactFrequency::Yearly,
    ];

    /// Target in days
    pub fn days(self) -> u32 {
        match self {
            ContactFrequency::Daily => 1,
            ContactFrequency::EveryThreeDays => 3,
            ContactFrequency::Weekly => 7,
            ContactFrequency::Biweekly => 14,
            ContactFrequency::Monthly => 30,
            ContactFrequency::Bimonthly => 60,
            ContactFrequency::Quarterly => 90,
            ContactFrequency::Biannually => 180,
            ContactFrequency::Yearly => 365,
        }
    }

    /// Look up the target for an exact day count
    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.days() == days)
    }

    /// Lowercase label used in config files and on the command line
    pub fn label(self) -> &'static str {
        match self {
            ContactFrequency::Daily => "daily",
            ContactFrequency::EveryThreeDays => "every-3-days",
            ContactFrequency::Weekly => "weekly",
            ContactFrequency::Biweekly => "biweekly",
            ContactFrequency::Monthly => "monthly",
            ContactFrequency::Bimonthly => "bimonthly",
            ContactFrequency::Quarterly => "quarterly",
            ContactFrequency::Biannually => "biannually",
            ContactFrequency::Yearly => "yearly",
        }
    }
}

impl From<ContactFrequency> for u32 {
    fn from(frequency: ContactFrequency) -> Self {
        frequency.days()
    }
}

impl TryFrom<u32> for ContactFrequency {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::from_days(days).ok_or_else(|| format!("Unsupported contact frequency: {} days", days))
    }
}

impl fmt::Display for ContactFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} days)", self.label(), self.days())
    }
}

impl FromStr for ContactFrequency {
    type Err = String;

    /// Accepts either a label (`weekly`) or a supported day count (`7`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(days) = s.parse::<u32>() {
            return Self::try_from(days);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.label() == s)
            .ok_or_else(|| format!("Invalid contact frequency: {}", s))
    }
}
