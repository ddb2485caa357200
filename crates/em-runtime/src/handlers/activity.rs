//! Activity feed for the poster and collector views.
//!
//! Subscribes to every topic and keeps an in-order log of what happened,
//! which the views re-render from.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_bus::{handler, EventNotifier, EventSubscriber, EventTopic, SubscriptionId};
use shared_types::{ItemId, ItemStatus, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub topic: EventTopic,
    pub item_id: ItemId,
    pub status: ItemStatus,
    pub poster_id: UserId,
    pub collector_id: Option<UserId>,
}

/// Observer recording every lifecycle event.
pub struct ActivityLog {
    notifier: Arc<EventNotifier>,
    subscriptions: Vec<(EventTopic, SubscriptionId)>,
    entries: Arc<Mutex<Vec<ActivityEntry>>>,
}

impl ActivityLog {
    pub fn attach(notifier: Arc<EventNotifier>) -> Self {
        let entries = Arc::new(Mutex::new(Vec::new()));

        let subscriptions = EventTopic::ALL
            .into_iter()
            .map(|topic| {
                let sink = entries.clone();
                let id = notifier.subscribe(
                    topic,
                    handler(move |event| {
                        let item = event.item();
                        sink.lock().push(ActivityEntry {
                            topic: event.topic(),
                            item_id: item.id().clone(),
                            status: item.status,
                            poster_id: item.posted_by_user_id.clone(),
                            collector_id: item.accepted_by.clone(),
                        });
                        Ok(())
                    }),
                );
                (topic, id)
            })
            .collect();

        Self {
            notifier,
            subscriptions,
            entries,
        }
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().clone()
    }

    /// Entries a poster's view shows: events on items they own.
    pub fn for_poster(&self, poster_id: &str) -> Vec<ActivityEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.poster_id == poster_id)
            .cloned()
            .collect()
    }

    /// Entries a collector's view shows: new listings plus their own pickups.
    pub fn for_collector(&self, collector_id: &str) -> Vec<ActivityEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| {
                e.topic == EventTopic::ItemCreated
                    || e.collector_id.as_deref() == Some(collector_id)
            })
            .cloned()
            .collect()
    }

    pub fn detach(self) {
        for (topic, id) in &self.subscriptions {
            self.notifier.unsubscribe(*topic, *id);
        }
    }
}
