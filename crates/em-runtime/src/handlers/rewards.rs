//! Reward notifications for posters.
//!
//! Listens on `itemCollected` and records "You earned N points" for the
//! poster who owns the collected item.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_bus::{handler, EventNotifier, EventSubscriber, EventTopic, SubscriptionId};
use shared_types::{ItemId, UserId};
use tracing::info;

/// One reward message shown to a poster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardNotification {
    pub poster_id: UserId,
    pub item_id: ItemId,
    pub points: u64,
    pub message: String,
}

/// Observer that turns completed pickups into poster notifications.
pub struct RewardObserver {
    notifier: Arc<EventNotifier>,
    subscription: SubscriptionId,
    notifications: Arc<Mutex<Vec<RewardNotification>>>,
}

impl RewardObserver {
    pub fn attach(notifier: Arc<EventNotifier>) -> Self {
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = notifications.clone();

        let subscription = notifier.subscribe(
            EventTopic::ItemCollected,
            handler(move |event| {
                let item = event.item();
                let notification = RewardNotification {
                    poster_id: item.posted_by_user_id.clone(),
                    item_id: item.id().clone(),
                    points: item.points(),
                    message: format!("You earned {} points", item.points()),
                };
                info!(
                    poster = %notification.poster_id,
                    points = notification.points,
                    "{}", notification.message
                );
                sink.lock().push(notification);
                Ok(())
            }),
        );

        Self {
            notifier,
            subscription,
            notifications,
        }
    }

    /// Every notification recorded so far, oldest first.
    pub fn notifications(&self) -> Vec<RewardNotification> {
        self.notifications.lock().clone()
    }

    /// Notifications for one poster.
    pub fn notifications_for(&self, poster_id: &str) -> Vec<RewardNotification> {
        self.notifications
            .lock()
            .iter()
            .filter(|n| n.poster_id == poster_id)
            .cloned()
            .collect()
    }

    /// Unsubscribes and returns what was recorded.
    pub fn detach(self) -> Vec<RewardNotification> {
        self.notifier
            .unsubscribe(EventTopic::ItemCollected, self.subscription);
        let recorded = self.notifications.lock().clone();
        recorded
    }
}
