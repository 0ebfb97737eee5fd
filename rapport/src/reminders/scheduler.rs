//! Arms, replaces and cancels the one reminder a friend may have.

use super::messages::{ReminderCategory, ReminderMessage, SelectionStrategy};
use super::service::NotificationService;
use crate::config::ReminderConfig;
use crate::models::Friend;
use std::sync::Arc;

const SECONDS_PER_DAY: u64 = 86_400;

/// What to schedule when a reminder is armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub delay_days: u32,
    pub category: ReminderCategory,
    /// Used verbatim instead of drawing from the category pool
    pub message: Option<ReminderMessage>,
    /// Overrides the scheduler's default strategy
    pub selection: Option<SelectionStrategy>,
}

impl ReminderRequest {
    pub fn new(delay_days: u32, category: ReminderCategory) -> Self {
        Self {
            delay_days,
            category,
            message: None,
            selection: None,
        }
    }

    pub fn with_message(mut self, message: ReminderMessage) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn delay_seconds(&self) -> u64 {
        u64::from(self.delay_days) * SECONDS_PER_DAY
    }
}

impl From<&ReminderConfig> for ReminderRequest {
    fn from(config: &ReminderConfig) -> Self {
        ReminderRequest::new(config.delay_days, config.category).with_selection(config.selection)
    }
}

/// Keeps at most one armed reminder per friend.
///
/// The handle lives on [`Friend::notification_id`]; the scheduler only ever
/// mutates that field. Delivery failures are logged and swallowed, so callers
/// never fail because a notification could not be scheduled or cancelled.
#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    service: Arc<dyn NotificationService>,
    default_selection: SelectionStrategy,
}

impl ReminderScheduler {
    pub fn new(service: Arc<dyn NotificationService>) -> Self {
        Self {
            service,
            default_selection: SelectionStrategy::Random,
        }
    }

    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.default_selection = selection;
        self
    }

    pub fn service(&self) -> &Arc<dyn NotificationService> {
        &self.service
    }

    /// The message `request` would produce for `friend`.
    pub fn compose(&self, friend: &Friend, request: &ReminderRequest) -> Option<ReminderMessage> {
        if let Some(message) = &request.message {
            return Some(message.clone());
        }
        let pool = request.category.pool(&friend.name.first_name);
        request
            .selection
            .unwrap_or(self.default_selection)
            .select(&pool)
    }

    /// Schedule a reminder and store its handle on the friend. Only reached
    /// through [`rearm`](Self::rearm), which cancels the previous handle first.
    async fn arm(&self, friend: &mut Friend, request: &ReminderRequest) -> Option<String> {
        let Some(message) = self.compose(friend, request) else {
            tracing::warn!(friend_id = %friend.id, category = %request.category, "No reminder message available");
            friend.notification_id = None;
            return None;
        };

        match self
            .service
            .schedule_one_shot(request.delay_seconds(), message.title, message.body)
            .await
        {
            Ok(handle) => {
                tracing::debug!(
                    friend_id = %friend.id,
                    handle = %handle,
                    delay_days = request.delay_days,
                    category = %request.category,
                    "Reminder armed"
                );
                friend.notification_id = Some(handle.clone());
                Some(handle)
            }
            Err(e) => {
                tracing::warn!(friend_id = %friend.id, error = %e, "Failed to schedule reminder");
                friend.notification_id = None;
                None
            }
        }
    }

    /// Cancel the friend's reminder, if any. The handle is cleared either way.
    pub async fn cancel(&self, friend: &mut Friend) {
        let Some(handle) = friend.notification_id.take() else {
            return;
        };

        match self.service.cancel(&handle).await {
            Ok(()) => tracing::debug!(friend_id = %friend.id, handle = %handle, "Reminder cancelled"),
            Err(e) => {
                tracing::warn!(friend_id = %friend.id, handle = %handle, error = %e, "Failed to cancel reminder")
            }
        }
    }

    /// Replace whatever reminder the friend has with a fresh one.
    pub async fn rearm(&self, friend: &mut Friend, request: &ReminderRequest) -> Option<String> {
        self.cancel(friend).await;
        self.arm(friend, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Name;
    use crate::reminders::service::{MockNotificationService, NotificationError};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn friend() -> Friend {
        Friend::new(Name::new("Ada", "Lovelace"))
    }

    #[tokio::test]
    async fn test_arm_stores_handle_and_uses_delay() {
        let mut service = MockNotificationService::new();
        service
            .expect_schedule_one_shot()
            .withf(|delay, _title, body| *delay == 30 * 86_400 && body.contains("Ada"))
            .times(1)
            .returning(|_, _, _| Ok("n-1".to_string()));

        let scheduler = ReminderScheduler::new(Arc::new(service));
        let mut ada = friend();
        let handle = scheduler
            .arm(&mut ada, &ReminderRequest::new(30, ReminderCategory::Reconnect))
            .await;

        assert_eq!(handle.as_deref(), Some("n-1"));
        assert_eq!(ada.notification_id.as_deref(), Some("n-1"));
    }

    #[tokio::test]
    async fn test_override_message_is_used_verbatim() {
        let mut service = MockNotificationService::new();
        service
            .expect_schedule_one_shot()
            .with(eq(86_400), eq("Custom".to_string()), eq("Body".to_string()))
            .times(1)
            .returning(|_, _, _| Ok("n-1".to_string()));

        let scheduler = ReminderScheduler::new(Arc::new(service));
        let request = ReminderRequest::new(1, ReminderCategory::HangoutSuggestion)
            .with_message(ReminderMessage::new("Custom", "Body"));
        scheduler.arm(&mut friend(), &request).await;
    }

    #[tokio::test]
    async fn test_rearm_twice_leaves_one_live_handle() {
        let mut service = MockNotificationService::new();
        let mut seq = Sequence::new();
        service
            .expect_schedule_one_shot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok("n-1".to_string()));
        service
            .expect_cancel()
            .withf(|handle| handle == "n-1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        service
            .expect_schedule_one_shot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok("n-2".to_string()));

        let scheduler = ReminderScheduler::new(Arc::new(service));
        let request = ReminderRequest::new(30, ReminderCategory::Reconnect);
        let mut ada = friend();
        scheduler.rearm(&mut ada, &request).await;
        scheduler.rearm(&mut ada, &request).await;

        assert_eq!(ada.notification_id.as_deref(), Some("n-2"));
    }

    #[tokio::test]
    async fn test_rearm_cancels_a_stored_handle_before_scheduling() {
        let mut service = MockNotificationService::new();
        let mut seq = Sequence::new();
        service
            .expect_cancel()
            .withf(|handle| handle == "loaded-from-disk")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        service
            .expect_schedule_one_shot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok("n-1".to_string()));

        let scheduler = ReminderScheduler::new(Arc::new(service));
        let mut ada = friend();
        ada.notification_id = Some("loaded-from-disk".to_string());
        scheduler
            .rearm(&mut ada, &ReminderRequest::new(30, ReminderCategory::Reconnect))
            .await;

        assert_eq!(ada.notification_id.as_deref(), Some("n-1"));
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let mut service = MockNotificationService::new();
        service
            .expect_cancel()
            .returning(|handle| {
                Err(NotificationError::Cancel {
                    handle: handle.to_string(),
                    reason: "gone".to_string(),
                })
            });
        service
            .expect_schedule_one_shot()
            .returning(|_, _, _| Err(NotificationError::Unavailable("offline".to_string())));

        let scheduler = ReminderScheduler::new(Arc::new(service));
        let mut ada = friend();
        ada.notification_id = Some("stale".to_string());

        let handle = scheduler
            .rearm(&mut ada, &ReminderRequest::new(30, ReminderCategory::Reconnect))
            .await;

        assert_eq!(handle, None);
        assert_eq!(ada.notification_id, None);
    }

    #[tokio::test]
    async fn test_cancel_without_handle_is_noop() {
        let service = MockNotificationService::new();
        let scheduler = ReminderScheduler::new(Arc::new(service));
        scheduler.cancel(&mut friend()).await;
    }

    #[test]
    fn test_compose_first_strategy() {
        let scheduler = ReminderScheduler::new(Arc::new(MockNotificationService::new()))
            .with_selection(SelectionStrategy::First);
        let ada = friend();
        let message = scheduler
            .compose(&ada, &ReminderRequest::new(30, ReminderCategory::Reconnect))
            .unwrap();
        assert_eq!(message, ReminderCategory::Reconnect.pool("Ada")[0]);
    }
}
