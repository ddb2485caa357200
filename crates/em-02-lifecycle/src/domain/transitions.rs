//! # Item Transitions
//!
//! Each function checks its preconditions, then applies the transition and
//! every stat side effect to the store. On `Err` the store is untouched, so
//! callers can run these inside a single store transaction.
//!
//! ```text
//! [ACTIVE] ──accept(collector)──→ [ACCEPTED] ──complete(collector)──→ [COMPLETED]
//!                                                                         │
//!                                                                  review(rating)
//! ```
//!
//! | Transition | Poster stats | Collector stats |
//! |------------|--------------|-----------------|
//! | create | totalPosts +1, activeItems +1 | - |
//! | accept | - | - |
//! | complete | totalPoints/pointsThisWeek +points, totalRecycled +1, activeItems -1 (floor 0) | totalPickups +1, completedToday +1 |
//! | review | - | rating folded into running mean |

use em_01_entity_store::EntityStore;
use shared_types::{
    ItemDraft, ItemId, ItemStatus, PostedItem, RecyclableItem, Timestamp, UserRole,
};

use super::errors::LifecycleError;

/// `user_id` must be registered and hold `required`.
fn require_role(
    store: &EntityStore,
    user_id: &str,
    required: UserRole,
) -> Result<(), LifecycleError> {
    let user = store
        .user(user_id)
        .ok_or_else(|| LifecycleError::user_not_found(user_id))?;
    if user.role != required {
        return Err(LifecycleError::WrongRole {
            user_id: user_id.to_string(),
            required,
            actual: user.role,
        });
    }
    Ok(())
}

/// Adds a new Active posting owned by `poster_id`, who must be a Poster.
/// No points are credited.
pub fn create_posting(
    store: &mut EntityStore,
    id: ItemId,
    draft: ItemDraft,
    poster_id: &str,
    now: Timestamp,
) -> Result<PostedItem, LifecycleError> {
    draft.validate()?;
    require_role(store, poster_id, UserRole::Poster)?;

    let item = PostedItem::new(
        RecyclableItem::from_draft(id, draft, now),
        poster_id.to_string(),
    );
    store.insert_posting(item.clone());

    let stats = store.poster_stats_entry(poster_id);
    stats.total_posts = stats.total_posts.saturating_add(1);
    stats.active_items = stats.active_items.saturating_add(1);

    Ok(item)
}

/// Active → Accepted by a registered Collector. The status check and the
/// write happen on the same `&mut` borrow, so a second accept observes
/// Accepted.
pub fn accept_posting(
    store: &mut EntityStore,
    item_id: &str,
    collector_id: &str,
    now: Timestamp,
) -> Result<PostedItem, LifecycleError> {
    if store.posted_item(item_id).is_none() {
        return Err(LifecycleError::item_not_found(item_id));
    }
    require_role(store, collector_id, UserRole::Collector)?;

    let item = store
        .posted_item_mut(item_id)
        .ok_or_else(|| LifecycleError::item_not_found(item_id))?;

    item.accept(collector_id, now)
        .map_err(|e| LifecycleError::invalid_state(item_id, e))?;
    Ok(item.clone())
}

/// Accepted → Completed, crediting the owner and the collector.
pub fn complete_posting(
    store: &mut EntityStore,
    item_id: &str,
    collector_id: &str,
    now: Timestamp,
) -> Result<PostedItem, LifecycleError> {
    let item = store
        .posted_item_mut(item_id)
        .ok_or_else(|| LifecycleError::item_not_found(item_id))?;

    if item.status == ItemStatus::Accepted && item.accepted_by.as_deref() != Some(collector_id) {
        return Err(LifecycleError::NotAssignee {
            item_id: item_id.to_string(),
            collector_id: collector_id.to_string(),
        });
    }
    item.complete(now)
        .map_err(|e| LifecycleError::invalid_state(item_id, e))?;
    let item = item.clone();

    let points = item.points();
    let poster = store.poster_stats_entry(&item.posted_by_user_id);
    poster.total_points = poster.total_points.saturating_add(points);
    poster.points_this_week = poster.points_this_week.saturating_add(points);
    poster.total_recycled = poster.total_recycled.saturating_add(1);
    poster.active_items = poster.active_items.saturating_sub(1);

    let collector = store.user_stats_entry(collector_id);
    collector.total_pickups = collector.total_pickups.saturating_add(1);
    collector.completed_today = collector.completed_today.saturating_add(1);

    Ok(item)
}

/// Records the poster's rating of the collector on a Completed item.
pub fn review_posting(
    store: &mut EntityStore,
    item_id: &str,
    rating: u8,
) -> Result<PostedItem, LifecycleError> {
    if !(1..=5).contains(&rating) {
        return Err(LifecycleError::InvalidRating(rating));
    }

    let item = store
        .posted_item_mut(item_id)
        .ok_or_else(|| LifecycleError::item_not_found(item_id))?;

    if item.status != ItemStatus::Completed {
        return Err(LifecycleError::InvalidState {
            item_id: item_id.to_string(),
            expected: ItemStatus::Completed,
            actual: item.status,
        });
    }
    if item.collector_rating.is_some() {
        return Err(LifecycleError::AlreadyReviewed {
            item_id: item_id.to_string(),
        });
    }
    item.collector_rating = Some(rating);
    let item = item.clone();

    if let Some(collector_id) = &item.accepted_by {
        store.user_stats_entry(collector_id).record_review(rating);
    }
    Ok(item)
}
