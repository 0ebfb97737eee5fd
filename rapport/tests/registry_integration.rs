//! End-to-end registry behaviour through the public API
//!
//! Covers the contact-logging/reminder lifecycle, cascading deletion, and the
//! guarantee that notification failures never fail a registry operation.

use async_trait::async_trait;
use chrono::NaiveDate;
use rapport::prelude::*;
use rapport::reminders::NotificationError;
use rapport::storage::MemorySnapshotStore;
use std::sync::Arc;
use std::sync::Mutex;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Records every call and optionally refuses to schedule
#[derive(Debug, Default)]
struct RecordingNotifier {
    fail_schedule: bool,
    scheduled: Mutex<Vec<(u64, String, String)>>,
    cancelled: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    async fn schedule_one_shot(
        &self,
        delay_seconds: u64,
        title: String,
        body: String,
    ) -> std::result::Result<String, NotificationError> {
        if self.fail_schedule {
            return Err(NotificationError::Unavailable("permission denied".into()));
        }
        let mut scheduled = self.scheduled.lock().unwrap();
        scheduled.push((delay_seconds, title, body));
        Ok(format!("handle-{}", scheduled.len()))
    }

    async fn cancel(&self, handle: &str) -> std::result::Result<(), NotificationError> {
        self.cancelled.lock().unwrap().push(handle.to_string());
        Ok(())
    }
}

struct Harness {
    registry: RelationshipRegistry,
    groups: GroupDirectory,
    notifier: Arc<RecordingNotifier>,
    clock: Arc<ManualClock>,
}

fn harness(notifier: RecordingNotifier) -> Harness {
    let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
    let notifier = Arc::new(notifier);
    let clock = Arc::new(ManualClock::at_date(date(2024, 1, 10)));
    let groups = GroupDirectory::new(store.clone());
    let registry = RelationshipRegistry::new(
        store,
        ReminderScheduler::new(notifier.clone()).with_selection(SelectionStrategy::First),
        Arc::new(groups.clone()),
        clock.clone(),
    );
    Harness {
        registry,
        groups,
        notifier,
        clock,
    }
}

#[tokio::test]
async fn test_overdue_lifecycle_with_time_travel() {
    let h = harness(RecordingNotifier::default());
    let ada = h
        .registry
        .add_friend(Name::new("Ada", "Lovelace"))
        .await
        .expect("add friend");

    assert!(ada.is_overdue(h.registry.today()));
    assert_eq!(ada.contact_progress(h.registry.today()), 1.0);

    h.registry.log_contact_now(&ada.id).await.expect("log contact");
    let ada = h.registry.find(&ada.id).await.unwrap();
    assert!(!ada.is_overdue(h.registry.today()));
    assert_eq!(ada.contact_progress(h.registry.today()), 0.0);

    h.clock.advance_days(15);
    let ada = h.registry.find(&ada.id).await.unwrap();
    assert_eq!(ada.contact_progress(h.registry.today()), 0.5);

    h.clock.advance_days(15);
    let ada = h.registry.find(&ada.id).await.unwrap();
    assert!(ada.is_overdue(h.registry.today()));
}

#[tokio::test]
async fn test_reminder_policy_defaults() {
    let h = harness(RecordingNotifier::default());
    let ada = h.registry.add_friend(Name::new("Ada", "")).await.unwrap();

    h.registry.log_contact_now(&ada.id).await.unwrap();
    h.registry
        .log_contact_on(&ada.id, date(2024, 1, 1))
        .await
        .unwrap();

    let scheduled = h.notifier.scheduled.lock().unwrap().clone();
    assert_eq!(scheduled.len(), 2);
    assert!(scheduled.iter().all(|(delay, _, _)| *delay == 30 * 86_400));
    let first = &ReminderCategory::Reconnect.pool("Ada")[0];
    assert_eq!(scheduled[0].1, first.title);
    assert_eq!(scheduled[0].2, first.body);

    // Exactly one live handle: the first was cancelled when re-arming
    assert_eq!(*h.notifier.cancelled.lock().unwrap(), vec!["handle-1"]);
    let ada = h.registry.find(&ada.id).await.unwrap();
    assert_eq!(ada.notification_id.as_deref(), Some("handle-2"));
}

#[tokio::test]
async fn test_schedule_failure_still_records_contact() {
    let h = harness(RecordingNotifier {
        fail_schedule: true,
        ..Default::default()
    });
    let bo = h.registry.add_friend(Name::new("Bo", "")).await.unwrap();

    let bo = h.registry.log_contact_now(&bo.id).await.expect("logging succeeds");
    assert_eq!(bo.contact_count(), 1);
    assert_eq!(bo.notification_id, None);
}

#[tokio::test]
async fn test_duplicate_backdated_contact() {
    let h = harness(RecordingNotifier::default());
    let cy = h.registry.add_friend(Name::new("Cy", "")).await.unwrap();

    h.registry
        .log_contact_on(&cy.id, date(2024, 1, 5))
        .await
        .unwrap();
    let err = h
        .registry
        .log_contact_on(&cy.id, date(2024, 1, 5))
        .await
        .unwrap_err();

    assert!(matches!(err, RapportError::DuplicateContact { date: d } if d == date(2024, 1, 5)));
    assert_eq!(h.registry.find(&cy.id).await.unwrap().contact_count(), 1);
}

#[tokio::test]
async fn test_delete_cascades_to_groups_and_reminder() {
    let h = harness(RecordingNotifier::default());
    let di = h.registry.add_friend(Name::new("Di", "")).await.unwrap();
    h.registry.log_contact_now(&di.id).await.unwrap();

    h.groups.create("Running").await.unwrap();
    h.groups.create("Work").await.unwrap();
    h.groups.add_member("Running", &di.id).await.unwrap();
    h.groups.add_member("Work", &di.id).await.unwrap();

    h.registry.remove_relationship(&di.id).await.unwrap();

    assert!(h.registry.find(&di.id).await.is_none());
    assert!(h.groups.groups_for(&di.id).await.is_empty());
    assert_eq!(*h.notifier.cancelled.lock().unwrap(), vec!["handle-1"]);
}

#[tokio::test]
async fn test_sort_and_filter() {
    let h = harness(RecordingNotifier::default());
    let today = h.registry.today();
    h.registry.add_friend(Name::new("A", "")).await.unwrap();
    let b = h.registry.add_friend(Name::new("B", "")).await.unwrap();
    let c = h.registry.add_friend(Name::new("C", "")).await.unwrap();
    h.registry
        .log_contact_on(&b.id, today - chrono::Duration::days(10))
        .await
        .unwrap();
    h.registry
        .log_contact_on(&c.id, today - chrono::Duration::days(2))
        .await
        .unwrap();
    h.registry
        .set_contact_frequency(&b.id, ContactFrequency::Weekly)
        .await
        .unwrap();

    let names = |friends: Vec<Friend>| {
        friends
            .into_iter()
            .map(|f| f.name.first_name)
            .collect::<Vec<_>>()
    };
    assert_eq!(names(h.registry.sorted(None).await), ["A", "B", "C"]);
    assert_eq!(
        names(h.registry.sorted(Some(SortKey::MostRecentContactFirst)).await),
        ["C", "B", "A"]
    );
    assert_eq!(names(h.registry.overdue().await), ["A", "B"]);
}
