//! # Event Subscriber
//!
//! Defines the subscription side of the notifier.

use std::sync::Arc;

use thiserror::Error;

use crate::events::{EventTopic, MarketplaceEvent};

/// Error a handler reports back to the publisher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A registered callback.
pub type Handler = Arc<dyn Fn(&MarketplaceEvent) -> Result<(), HandlerError> + Send + Sync>;

/// Identity of a registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Trait for registering handlers on the notifier.
pub trait EventSubscriber: Send + Sync {
    /// Register `handler` for `topic`. Handlers run in registration order.
    fn subscribe(&self, topic: EventTopic, handler: Handler) -> SubscriptionId;

    /// Remove a registration. Returns false if it was not registered on `topic`.
    fn unsubscribe(&self, topic: EventTopic, id: SubscriptionId) -> bool;
}

/// Wraps a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&MarketplaceEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}
