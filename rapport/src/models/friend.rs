//! The tracked relationship entity.

use super::contact_history::{ContactError, ContactHistory};
use super::frequency::ContactFrequency;
use super::name::Name;
use super::tag::Tag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person being kept in touch with.
///
/// Serialized in the persisted snapshot layout:
/// `id, name{firstName,lastName}, contacts[], notes, notificationId?,
/// profilePhotoUri?, contactFrequency, tags[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    /// Immutable unique identifier
    pub id: String,

    /// Display name
    pub name: Name,

    /// Contact dates, oldest first
    #[serde(default)]
    contacts: ContactHistory,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Handle of the currently armed one-shot reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,

    /// Reference to an avatar image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_uri: Option<String>,

    /// Desired maximum gap between contacts
    #[serde(default)]
    pub contact_frequency: ContactFrequency,

    /// Categories this friend belongs to
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Staleness summary for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactStatus {
    pub last_contact: Option<NaiveDate>,
    pub days_since_last_contact: Option<i64>,
    pub progress: f64,
    pub overdue: bool,
}

impl Friend {
    /// Create a friend with no contacts and the default (monthly) target
    pub fn new(name: Name) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            contacts: ContactHistory::new(),
            notes: String::new(),
            notification_id: None,
            profile_photo_uri: None,
            contact_frequency: ContactFrequency::default(),
            tags: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_contact_frequency(mut self, frequency: ContactFrequency) -> Self {
        self.contact_frequency = frequency;
        self
    }

    /// Seed the history, e.g. when importing
    pub fn with_contacts<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.contacts = ContactHistory::from_dates(dates);
        self
    }

    pub fn contacts(&self) -> &ContactHistory {
        &self.contacts
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Record a contact today; `false` if one is already recorded today
    pub fn push_contact(&mut self, today: NaiveDate) -> bool {
        self.contacts.record_contact_now(today)
    }

    /// Record a backdated contact
    pub fn add_contact(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), ContactError> {
        self.contacts.record_contact_on(date, today)
    }

    pub fn remove_contact(&mut self, date: NaiveDate) -> bool {
        self.contacts.remove_contact_on(date)
    }

    pub fn remove_last_contact(&mut self) -> Option<NaiveDate> {
        self.contacts.remove_most_recent()
    }

    pub fn last_contact(&self) -> Option<NaiveDate> {
        self.contacts.last_contact_date()
    }

    pub fn days_since_last_contact(&self, today: NaiveDate) -> Option<i64> {
        self.contacts.days_since_last_contact(today)
    }

    pub fn contact_progress(&self, today: NaiveDate) -> f64 {
        self.contacts
            .contact_progress(today, self.contact_frequency.days())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.contacts.is_overdue(today, self.contact_frequency.days())
    }

    pub fn status(&self, today: NaiveDate) -> ContactStatus {
        ContactStatus {
            last_contact: self.last_contact(),
            days_since_last_contact: self.days_since_last_contact(today),
            progress: self.contact_progress(today),
            overdue: self.is_overdue(today),
        }
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Attach a tag; idempotent by tag id
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if self.has_tag(&tag.id) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag_id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != tag_id);
        self.tags.len() != before
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_profile_photo(&mut self, uri: impl Into<String>) {
        self.profile_photo_uri = Some(uri.into());
    }

    pub fn set_contact_frequency(&mut self, frequency: ContactFrequency) {
        self.contact_frequency = frequency;
    }

    pub fn rename(&mut self, name: Name) {
        self.name = name;
    }
}
