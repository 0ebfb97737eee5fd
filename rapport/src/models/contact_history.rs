//! Ordered, date-keyed contact history and the staleness signals derived from it.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Rejection reasons for a backdated contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    /// The calendar date is already in the history
    #[error("a contact is already recorded on {0}")]
    Duplicate(NaiveDate),

    /// The date lies after today
    #[error("{0} is in the future")]
    FutureDate(NaiveDate),
}

/// Contact dates for a single friend.
///
/// Invariants: strictly ascending, so no calendar date appears twice and the
/// most recent contact is always the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactHistory {
    dates: Vec<NaiveDate>,
}

impl ContactHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from arbitrary dates, sorting and dropping duplicates.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    /// Number of recorded contacts
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no contact was ever recorded
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in ascending order
    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Iterate dates oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    /// Whether `date` is recorded
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Record a contact for `today`.
    ///
    /// Returns `false` without changing anything when today is already present.
    pub fn record_contact_now(&mut self, today: NaiveDate) -> bool {
        match self.dates.binary_search(&today) {
            Ok(_) => false,
            Err(position) => {
                self.dates.insert(position, today);
                true
            }
        }
    }

    /// Record a (possibly backdated) contact, keeping ascending order.
    pub fn record_contact_on(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), ContactError> {
        if date > today {
            return Err(ContactError::FutureDate(date));
        }
        match self.dates.binary_search(&date) {
            Ok(_) => Err(ContactError::Duplicate(date)),
            Err(position) => {
                self.dates.insert(position, date);
                Ok(())
            }
        }
    }

    /// Remove the contact on `date`. Returns whether anything was removed.
    pub fn remove_contact_on(&mut self, date: NaiveDate) -> bool {
        match self.dates.binary_search(&date) {
            Ok(position) => {
                self.dates.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove and return the latest contact
    pub fn remove_most_recent(&mut self) -> Option<NaiveDate> {
        self.dates.pop()
    }

    /// Latest contact date
    pub fn last_contact_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Whole days between the last contact and `today`, never negative.
    pub fn days_since_last_contact(&self, today: NaiveDate) -> Option<i64> {
        self.last_contact_date()
            .map(|last| (today - last).num_days().max(0))
    }

    /// Fraction of the contact-frequency target that has elapsed, in `[0, 1]`.
    ///
    /// An empty history is fully overdue.
    pub fn contact_progress(&self, today: NaiveDate, target_days: u32) -> f64 {
        match self.days_since_last_contact(today) {
            None => 1.0,
            Some(_) if target_days == 0 => 1.0,
            Some(days) => (days as f64 / f64::from(target_days)).min(1.0),
        }
    }

    /// Whether the target has elapsed since the last contact (or there is none).
    pub fn is_overdue(&self, today: NaiveDate, target_days: u32) -> bool {
        match self.days_since_last_contact(today) {
            None => true,
            Some(days) => days >= i64::from(target_days),
        }
    }
}

impl<'de> Deserialize<'de> for ContactHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Older snapshots stored full timestamps of the local wall clock
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StoredDate {
            Date(NaiveDate),
            Timestamp(DateTime<Utc>),
        }

        let stored = Vec::<StoredDate>::deserialize(deserializer)?;
        Ok(Self::from_dates(stored.into_iter().map(|d| match d {
            StoredDate::Date(date) => date,
            StoredDate::Timestamp(ts) => calendar_day(ts, &Local),
        })))
    }
}

/// The calendar day `instant` fell on for someone living in `zone`
pub(crate) fn calendar_day<Tz: TimeZone>(instant: DateTime<Utc>, zone: &Tz) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

impl<'a> IntoIterator for &'a ContactHistory {
    type Item = &'a NaiveDate;
    type IntoIter = std::slice::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}
