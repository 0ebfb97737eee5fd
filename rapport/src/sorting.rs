//! Orderings and filters over a collection of friends.
//!
//! All comparators are pure and used with a stable sort, so friends that
//! compare equal keep their input order.

use crate::models::Friend;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Named ordering strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Never-contacted first, then oldest last contact first
    #[default]
    LeastRecentContactFirst,
    /// Newest last contact first, never-contacted last
    MostRecentContactFirst,
    /// Ascending contact count
    FewestContactsFirst,
    /// Descending contact count
    MostContactsFirst,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::LeastRecentContactFirst,
        SortKey::MostRecentContactFirst,
        SortKey::FewestContactsFirst,
        SortKey::MostContactsFirst,
    ];

    /// The comparator for this key
    pub fn compare(self, a: &Friend, b: &Friend) -> Ordering {
        match self {
            SortKey::LeastRecentContactFirst => least_recent_contact_first(a, b),
            SortKey::MostRecentContactFirst => most_recent_contact_first(a, b),
            SortKey::FewestContactsFirst => fewest_contacts_first(a, b),
            SortKey::MostContactsFirst => most_contacts_first(a, b),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::LeastRecentContactFirst => "least-recent",
            SortKey::MostRecentContactFirst => "most-recent",
            SortKey::FewestContactsFirst => "fewest-contacts",
            SortKey::MostContactsFirst => "most-contacts",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "least-recent" | "least-recent-contact-first" => Ok(SortKey::LeastRecentContactFirst),
            "most-recent" | "most-recent-contact-first" => Ok(SortKey::MostRecentContactFirst),
            "fewest-contacts" | "fewest-contacts-first" => Ok(SortKey::FewestContactsFirst),
            "most-contacts" | "most-contacts-first" => Ok(SortKey::MostContactsFirst),
            other => Err(format!("Invalid sort key: {}", other)),
        }
    }
}

pub fn least_recent_contact_first(a: &Friend, b: &Friend) -> Ordering {
    match (a.last_contact(), b.last_contact()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

pub fn most_recent_contact_first(a: &Friend, b: &Friend) -> Ordering {
    match (a.last_contact(), b.last_contact()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => y.cmp(&x),
    }
}

pub fn fewest_contacts_first(a: &Friend, b: &Friend) -> Ordering {
    a.contact_count().cmp(&b.contact_count())
}

pub fn most_contacts_first(a: &Friend, b: &Friend) -> Ordering {
    b.contact_count().cmp(&a.contact_count())
}

/// Stable sort into a new vector. `None` uses the default key.
pub fn sort_friends(friends: &[Friend], key: Option<SortKey>) -> Vec<Friend> {
    let key = key.unwrap_or_default();
    let mut sorted = friends.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Friends whose contact target has elapsed, in input order
pub fn filter_overdue(friends: &[Friend], today: NaiveDate) -> Vec<Friend> {
    friends
        .iter()
        .filter(|f| f.is_overdue(today))
        .cloned()
        .collect()
}

/// Friends carrying the given tag, in input order
pub fn filter_by_tag(friends: &[Friend], tag_id: &str) -> Vec<Friend> {
    friends
        .iter()
        .filter(|f| f.has_tag(tag_id))
        .cloned()
        .collect()
}
