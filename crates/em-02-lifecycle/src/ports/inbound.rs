//! # Inbound Port - LifecycleApi
//!
//! Primary driving port used by the poster and collector views.
//!
//! | Method | Caller |
//! |--------|--------|
//! | `create_item`, `pickup_code`, `pickup_modal`, `review_collector` | Poster view |
//! | `accept_item`, `complete_pickup`, `complete_pickup_with_code`, `reject_item` | Collector view |
//! | `reset_app` | Settings |

use shared_types::{ItemDraft, PickupModal, PostedItem, RecyclableItem};

use crate::domain::LifecycleError;

/// Primary API for the Lifecycle Engine.
///
/// Every mutating call either commits completely and returns the updated
/// item, or returns an error and leaves state unchanged.
pub trait LifecycleApi: Send + Sync {
    /// Lists a new bag for `poster_id`.
    ///
    /// Weight and points are computed from the draft's materials. The poster's
    /// `totalPosts` and `activeItems` go up by one; no points are credited.
    /// Emits `itemCreated`.
    ///
    /// # Errors
    /// - `InvalidItem`: the draft failed validation
    /// - `NotFound`: the poster is not a registered user
    /// - `WrongRole`: the user is not a poster
    fn create_item(&self, draft: ItemDraft, poster_id: &str)
        -> Result<PostedItem, LifecycleError>;

    /// Claims an Active item for `collector_id`. At most one caller wins.
    ///
    /// Emits `itemAccepted`.
    ///
    /// # Errors
    /// - `NotFound`: no such item, or the collector is not a registered user
    /// - `WrongRole`: the user is not a collector
    /// - `InvalidState`: the item is not Active
    fn accept_item(&self, item_id: &str, collector_id: &str)
        -> Result<PostedItem, LifecycleError>;

    /// Completes a pickup, crediting the item's points to its owner.
    ///
    /// Emits `itemCollected`.
    ///
    /// # Errors
    /// - `NotFound`: no such item
    /// - `InvalidState`: the item is not Accepted
    /// - `NotAssignee`: `collector_id` did not accept the item
    fn complete_pickup(
        &self,
        item_id: &str,
        collector_id: &str,
    ) -> Result<PostedItem, LifecycleError>;

    /// Hides an item from one collector's candidates. No state change, no event.
    fn reject_item(&self, item_id: &str, collector_id: &str) -> Result<(), LifecycleError>;

    /// Restores seed data, logs out, and clears rejection filters.
    /// Subscriptions on the notifier are kept.
    fn reset_app(&self);

    /// Listings still open for acceptance, recomputed on every call.
    fn get_available_items(&self) -> Vec<RecyclableItem>;

    /// Available listings minus the ones this collector rejected.
    fn get_candidate_items(&self, collector_id: &str) -> Vec<RecyclableItem>;

    fn get_item(&self, item_id: &str) -> Option<PostedItem>;

    fn get_poster_items(&self, poster_id: &str) -> Vec<PostedItem>;

    /// Items the collector accepted and has not completed yet.
    fn get_collector_pickups(&self, collector_id: &str) -> Vec<PostedItem>;

    /// Items the collector completed, most recent first.
    fn get_collector_history(&self, collector_id: &str) -> Vec<PostedItem>;

    /// QR code for an Accepted item.
    fn pickup_code(&self, item_id: &str) -> Result<String, LifecycleError>;

    /// Completes the pickup identified by a scanned QR code.
    fn complete_pickup_with_code(
        &self,
        code: &str,
        collector_id: &str,
    ) -> Result<PostedItem, LifecycleError>;

    /// Pickup dialog for the poster: QR for Accepted, review for Completed.
    fn pickup_modal(&self, item_id: &str) -> Result<PickupModal, LifecycleError>;

    /// Rates the collector of a Completed item (1..=5), once per item.
    fn review_collector(&self, item_id: &str, rating: u8) -> Result<PostedItem, LifecycleError>;
}
