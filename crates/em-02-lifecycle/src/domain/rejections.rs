//! Collector "not interested" filter.
//!
//! Purely a view filter: rejecting never touches the posted item, emits
//! nothing, and is never persisted.

use std::collections::{HashMap, HashSet};

use shared_types::{ItemId, RecyclableItem, UserId};

/// Items each collector has dismissed during this session.
#[derive(Debug, Default)]
pub struct RejectionFilter {
    rejected: HashMap<UserId, HashSet<ItemId>>,
}

impl RejectionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the collector had already rejected the item.
    pub fn reject(&mut self, collector_id: &str, item_id: &str) -> bool {
        self.rejected
            .entry(collector_id.to_string())
            .or_default()
            .insert(item_id.to_string())
    }

    pub fn is_rejected(&self, collector_id: &str, item_id: &str) -> bool {
        self.rejected
            .get(collector_id)
            .is_some_and(|items| items.contains(item_id))
    }

    /// Drops the collector's rejected items from `items`.
    pub fn filter(&self, collector_id: &str, items: Vec<RecyclableItem>) -> Vec<RecyclableItem> {
        match self.rejected.get(collector_id) {
            Some(rejected) => items
                .into_iter()
                .filter(|item| !rejected.contains(&item.id))
                .collect(),
            None => items,
        }
    }

    pub fn clear(&mut self) {
        self.rejected.clear();
    }
}
