//! # Marketplace Events
//!
//! Defines all event types that flow through the notifier.

use serde::{Deserialize, Serialize};
use shared_types::entities::PostedItem;

/// All events that can be published to the notifier.
///
/// Each carries the posted item as it was right after the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketplaceEvent {
    /// A poster listed a new bag.
    ItemCreated(PostedItem),

    /// A collector claimed an active bag.
    ItemAccepted(PostedItem),

    /// A collector completed the pickup; consumers read `points` for the
    /// reward notification.
    ItemCollected(PostedItem),
}

impl MarketplaceEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ItemCreated(_) => EventTopic::ItemCreated,
            Self::ItemAccepted(_) => EventTopic::ItemAccepted,
            Self::ItemCollected(_) => EventTopic::ItemCollected,
        }
    }

    /// The item this event is about.
    #[must_use]
    pub fn item(&self) -> &PostedItem {
        match self {
            Self::ItemCreated(item) | Self::ItemAccepted(item) | Self::ItemCollected(item) => {
                item
            }
        }
    }
}

/// Named topics handlers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventTopic {
    ItemCreated,
    ItemAccepted,
    ItemCollected,
}

impl EventTopic {
    /// Every topic, in lifecycle order.
    pub const ALL: [EventTopic; 3] = [
        EventTopic::ItemCreated,
        EventTopic::ItemAccepted,
        EventTopic::ItemCollected,
    ];

    /// Wire name of the topic.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemCreated => "itemCreated",
            Self::ItemAccepted => "itemAccepted",
            Self::ItemCollected => "itemCollected",
        }
    }
}

impl std::fmt::Display for EventTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EventTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventTopic::ALL
            .into_iter()
            .find(|topic| topic.name() == s)
            .ok_or_else(|| format!("Unknown topic: {}", s))
    }
}
