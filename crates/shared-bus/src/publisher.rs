//! # Event Publisher
//!
//! Defines the publishing side of the notifier and its in-process
//! implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::events::{EventTopic, MarketplaceEvent};
use crate::subscriber::{EventSubscriber, Handler, HandlerError, SubscriptionId};

/// One handler that failed during a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub subscription: SubscriptionId,
    pub error: HandlerError,
}

/// Error type for publish operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Every handler ran; these ones failed.
    #[error("{} handler(s) failed on {topic}", .failures.len())]
    HandlerFailed {
        topic: EventTopic,
        failures: Vec<HandlerFailure>,
    },
}

/// Trait for publishing events.
///
/// This is the interface the lifecycle engine uses to emit events for
/// consumption by poster and collector views.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to every handler registered for its topic.
    ///
    /// # Returns
    ///
    /// The number of handlers invoked, or the failures if any handler
    /// returned an error.
    fn publish(&self, event: MarketplaceEvent) -> Result<usize, PublishError>;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// Synchronous in-process publish/subscribe notifier.
///
/// Owned by the composition root and injected wherever events are emitted
/// or observed. Handlers for a topic are invoked on the publishing thread,
/// in registration order. There is no replay for late subscribers.
#[derive(Default)]
pub struct EventNotifier {
    /// Registered handlers by topic, in registration order.
    handlers: RwLock<HashMap<EventTopic, Vec<(SubscriptionId, Handler)>>>,

    /// Source of subscription ids.
    next_id: AtomicU64,

    /// Total events published.
    events_published: AtomicU64,
}

impl EventNotifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered for `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: EventTopic) -> usize {
        self.handlers.read().get(&topic).map_or(0, Vec::len)
    }

    /// Drop every registration on every topic.
    pub fn clear(&self) {
        self.handlers.write().clear();
        debug!("All subscriptions cleared");
    }
}

impl std::fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<EventTopic, usize> = self
            .handlers
            .read()
            .iter()
            .map(|(topic, list)| (*topic, list.len()))
            .collect();
        f.debug_struct("EventNotifier")
            .field("subscribers", &counts)
            .field("events_published", &self.events_published())
            .finish()
    }
}

impl EventSubscriber for EventNotifier {
    fn subscribe(&self, topic: EventTopic, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .entry(topic)
            .or_default()
            .push((id, handler));

        debug!(topic = %topic, subscription = %id, "New subscription created");
        id
    }

    fn unsubscribe(&self, topic: EventTopic, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let Some(list) = handlers.get_mut(&topic) else {
            return false;
        };

        let before = list.len();
        list.retain(|(sub, _)| *sub != id);
        let removed = list.len() != before;
        if list.is_empty() {
            handlers.remove(&topic);
        }

        debug!(topic = %topic, subscription = %id, removed, "Subscription dropped");
        removed
    }
}

impl EventPublisher for EventNotifier {
    fn publish(&self, event: MarketplaceEvent) -> Result<usize, PublishError> {
        let topic = event.topic();
        self.events_published.fetch_add(1, Ordering::Relaxed);

        // Snapshot so handlers can (un)subscribe or publish re-entrantly.
        let snapshot: Vec<(SubscriptionId, Handler)> = self
            .handlers
            .read()
            .get(&topic)
            .cloned()
            .unwrap_or_default();

        let mut failures = Vec::new();
        for (subscription, handler) in &snapshot {
            if let Err(error) = handler(&event) {
                warn!(
                    topic = %topic,
                    subscription = %subscription,
                    item_id = %event.item().id(),
                    error = %error,
                    "Event handler failed"
                );
                failures.push(HandlerFailure {
                    subscription: *subscription,
                    error,
                });
            }
        }

        debug!(
            topic = %topic,
            item_id = %event.item().id(),
            receivers = snapshot.len(),
            "Event published"
        );

        if failures.is_empty() {
            Ok(snapshot.len())
        } else {
            Err(PublishError::HandlerFailed { topic, failures })
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

/// Publisher that drops every event. For wiring without observers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPublisher;

impl EventPublisher for NoOpPublisher {
    fn publish(&self, _event: MarketplaceEvent) -> Result<usize, PublishError> {
        Ok(0)
    }

    fn events_published(&self) -> u64 {
        0
    }
}
