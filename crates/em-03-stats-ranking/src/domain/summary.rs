//! History-derived summaries.
//!
//! Recomputes poster and collector figures from posted items alone, so the
//! incrementally maintained stats can be audited against the history.

use chrono::Duration;
use em_01_entity_store::EntityStore;
use serde::{Deserialize, Serialize};
use shared_types::{ItemStatus, PostedItem, Timestamp};

use super::errors::StatsError;

/// Length of the `pointsThisWeek` window.
pub const POINTS_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PosterSummary {
    pub total_posts: u32,
    pub total_recycled: u32,
    pub active_items: u32,
    pub total_points: u64,
    /// Points from pickups completed in the trailing seven days.
    pub points_this_week: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollectorSummary {
    pub total_pickups: u32,
    /// Pickups completed on the same UTC date as `now`.
    pub completed_today: u32,
}

pub fn derive_poster_summary(
    store: &EntityStore,
    poster_id: &str,
    now: Timestamp,
) -> Result<PosterSummary, StatsError> {
    if store.user(poster_id).is_none() {
        return Err(StatsError::UserNotFound(poster_id.to_string()));
    }

    let window_start = now - Duration::days(POINTS_WINDOW_DAYS);
    let mut summary = PosterSummary::default();

    for item in store
        .posted_items()
        .iter()
        .filter(|p| p.posted_by_user_id == poster_id)
    {
        summary.total_posts += 1;
        match completed_at(item) {
            Some(done) => {
                summary.total_recycled += 1;
                summary.total_points += item.points();
                if done > window_start && done <= now {
                    summary.points_this_week += item.points();
                }
            }
            None => summary.active_items += 1,
        }
    }
    Ok(summary)
}

pub fn derive_collector_summary(
    store: &EntityStore,
    collector_id: &str,
    now: Timestamp,
) -> Result<CollectorSummary, StatsError> {
    if store.user(collector_id).is_none() {
        return Err(StatsError::UserNotFound(collector_id.to_string()));
    }

    let today = now.date_naive();
    let mut summary = CollectorSummary::default();

    for done in store
        .posted_items()
        .iter()
        .filter(|p| p.accepted_by.as_deref() == Some(collector_id))
        .filter_map(completed_at)
    {
        summary.total_pickups += 1;
        if done.date_naive() == today {
            summary.completed_today += 1;
        }
    }
    Ok(summary)
}

fn completed_at(item: &PostedItem) -> Option<Timestamp> {
    match item.status {
        ItemStatus::Completed => item.completed_at,
        ItemStatus::Active | ItemStatus::Accepted => None,
    }
}
