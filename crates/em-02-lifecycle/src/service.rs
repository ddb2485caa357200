//! Lifecycle Engine service
//!
//! Runs each transition as one store transaction, then publishes the
//! matching event once the store lock has been released.
//!
//! ```text
//! accept_item ─→ StoreService::transact ─→ accept_posting ─→ save(blob)
//!                                                                 │
//!                         publish(ItemAccepted) ←── lock released ┘
//! ```

use std::sync::Arc;

use em_01_entity_store::{EntityStore, StoreService};
use parking_lot::RwLock;
use shared_bus::{EventPublisher, MarketplaceEvent};
use shared_types::{ItemDraft, ItemStatus, PickupModal, PostedItem, RecyclableItem};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::{
    accept_posting, complete_posting, create_posting, parse_pickup_code, pickup_code,
    review_posting, LifecycleError, RejectionFilter,
};
use crate::ports::inbound::LifecycleApi;

/// Lifecycle Engine implementation.
pub struct LifecycleEngine {
    store: Arc<StoreService>,
    publisher: Arc<dyn EventPublisher>,
    rejections: RwLock<RejectionFilter>,
}

impl LifecycleEngine {
    pub fn new(store: Arc<StoreService>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            publisher,
            rejections: RwLock::new(RejectionFilter::new()),
        }
    }

    pub fn store(&self) -> &Arc<StoreService> {
        &self.store
    }

    /// The transition is already committed; observer failures are logged.
    fn emit(&self, event: MarketplaceEvent) {
        let topic = event.topic();
        let item_id = event.item().id().clone();
        match self.publisher.publish(event) {
            Ok(handlers) => debug!(topic = %topic, item_id = %item_id, handlers, "Event published"),
            Err(e) => error!(
                topic = %topic,
                item_id = %item_id,
                error = %e,
                "Observers failed after committed transition"
            ),
        }
    }

    fn require_item(&self, item_id: &str) -> Result<PostedItem, LifecycleError> {
        self.get_item(item_id)
            .ok_or_else(|| LifecycleError::item_not_found(item_id))
    }
}

impl LifecycleApi for LifecycleEngine {
    fn create_item(
        &self,
        draft: ItemDraft,
        poster_id: &str,
    ) -> Result<PostedItem, LifecycleError> {
        let id = Uuid::new_v4().to_string();
        let item = self
            .store
            .transact(|store, now| create_posting(store, id, draft, poster_id, now))?;

        info!(
            item_id = %item.id(),
            poster = %poster_id,
            points = item.points(),
            "Item created"
        );
        self.emit(MarketplaceEvent::ItemCreated(item.clone()));
        Ok(item)
    }

    fn accept_item(
        &self,
        item_id: &str,
        collector_id: &str,
    ) -> Result<PostedItem, LifecycleError> {
        let item = self
            .store
            .transact(|store, now| accept_posting(store, item_id, collector_id, now))?;

        info!(item_id = %item_id, collector = %collector_id, "Item accepted");
        self.emit(MarketplaceEvent::ItemAccepted(item.clone()));
        Ok(item)
    }

    fn complete_pickup(
        &self,
        item_id: &str,
        collector_id: &str,
    ) -> Result<PostedItem, LifecycleError> {
        let item = self
            .store
            .transact(|store, now| complete_posting(store, item_id, collector_id, now))?;

        info!(
            item_id = %item_id,
            collector = %collector_id,
            poster = %item.posted_by_user_id,
            points = item.points(),
            "Pickup completed"
        );
        self.emit(MarketplaceEvent::ItemCollected(item.clone()));
        Ok(item)
    }

    fn reject_item(&self, item_id: &str, collector_id: &str) -> Result<(), LifecycleError> {
        let known = self.store.read(|store| {
            store.posted_item(item_id).is_some()
                || store.recyclable_items().iter().any(|i| i.id == item_id)
        });
        if !known {
            return Err(LifecycleError::item_not_found(item_id));
        }

        if self.rejections.write().reject(collector_id, item_id) {
            debug!(item_id = %item_id, collector = %collector_id, "Item rejected");
        }
        Ok(())
    }

    fn reset_app(&self) {
        self.store.reset();
        self.rejections.write().clear();
        info!("App reset; subscriptions kept");
    }

    fn get_available_items(&self) -> Vec<RecyclableItem> {
        self.store.read(EntityStore::available_items)
    }

    fn get_candidate_items(&self, collector_id: &str) -> Vec<RecyclableItem> {
        let available = self.get_available_items();
        self.rejections.read().filter(collector_id, available)
    }

    fn get_item(&self, item_id: &str) -> Option<PostedItem> {
        self.store.read(|store| store.posted_item(item_id).cloned())
    }

    fn get_poster_items(&self, poster_id: &str) -> Vec<PostedItem> {
        self.store.read(|store| store.items_posted_by(poster_id))
    }

    fn get_collector_pickups(&self, collector_id: &str) -> Vec<PostedItem> {
        self.store.read(|store| {
            store
                .items_accepted_by(collector_id)
                .into_iter()
                .filter(|item| item.status == ItemStatus::Accepted)
                .collect()
        })
    }

    fn get_collector_history(&self, collector_id: &str) -> Vec<PostedItem> {
        let mut history: Vec<PostedItem> = self.store.read(|store| {
            store
                .items_accepted_by(collector_id)
                .into_iter()
                .filter(|item| item.status == ItemStatus::Completed)
                .collect()
        });
        history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        history
    }

    fn pickup_code(&self, item_id: &str) -> Result<String, LifecycleError> {
        let item = self.require_item(item_id)?;
        if item.status != ItemStatus::Accepted {
            return Err(LifecycleError::InvalidState {
                item_id: item_id.to_string(),
                expected: ItemStatus::Accepted,
                actual: item.status,
            });
        }
        Ok(pickup_code(item_id))
    }

    fn complete_pickup_with_code(
        &self,
        code: &str,
        collector_id: &str,
    ) -> Result<PostedItem, LifecycleError> {
        let item_id = parse_pickup_code(code)?;
        self.complete_pickup(item_id, collector_id)
    }

    fn pickup_modal(&self, item_id: &str) -> Result<PickupModal, LifecycleError> {
        let item = self.require_item(item_id)?;
        match item.status {
            ItemStatus::Accepted => Ok(PickupModal::GenerateQr {
                code: pickup_code(item_id),
                item,
            }),
            ItemStatus::Completed => Ok(PickupModal::ReviewCollector {
                rating: item.collector_rating,
                item,
            }),
            ItemStatus::Active => Err(LifecycleError::InvalidState {
                item_id: item_id.to_string(),
                expected: ItemStatus::Accepted,
                actual: ItemStatus::Active,
            }),
        }
    }

    fn review_collector(&self, item_id: &str, rating: u8) -> Result<PostedItem, LifecycleError> {
        let item = self
            .store
            .transact(|store, _| review_posting(store, item_id, rating))?;
        info!(item_id = %item_id, rating, "Collector reviewed");
        Ok(item)
    }
}

impl std::fmt::Debug for LifecycleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleEngine")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
