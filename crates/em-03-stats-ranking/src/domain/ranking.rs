//! # Rankings
//!
//! Posters are ranked by total points, collectors by completed pickups.
//! Every ordering ends with the user id so equal scores always come out in
//! the same order.
//!
//! | Board | Primary | Secondary | Tie-break |
//! |-------|---------|-----------|-----------|
//! | Posters | `totalPoints` desc | - | user id asc |
//! | Collectors | `totalPickups` desc | `rating` desc | user id asc |

use std::cmp::Ordering;

use em_01_entity_store::EntityStore;
use serde::{Deserialize, Serialize};
use shared_types::UserId;

/// One row of the poster leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterRankEntry {
    /// 1-based position.
    pub rank: usize,
    pub user_id: UserId,
    pub username: String,
    pub total_points: u64,
}

/// One row of the collector leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorRankEntry {
    pub rank: usize,
    pub user_id: UserId,
    pub username: String,
    pub total_pickups: u32,
    pub rating: f64,
}

fn username(store: &EntityStore, id: &str) -> String {
    store
        .user(id)
        .map_or_else(|| id.to_string(), |u| u.username.clone())
}

pub fn rank_posters(store: &EntityStore) -> Vec<PosterRankEntry> {
    let mut rows: Vec<(&UserId, u64)> = store
        .all_poster_stats()
        .iter()
        .map(|(id, stats)| (id, stats.total_points))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    rows.into_iter()
        .enumerate()
        .map(|(i, (id, total_points))| PosterRankEntry {
            rank: i + 1,
            user_id: id.clone(),
            username: username(store, id),
            total_points,
        })
        .collect()
}

pub fn rank_collectors(store: &EntityStore) -> Vec<CollectorRankEntry> {
    let mut rows: Vec<(&UserId, u32, f64)> = store
        .all_user_stats()
        .iter()
        .map(|(id, stats)| (id, stats.total_pickups, stats.rating))
        .collect();
    rows.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
            .then_with(|| a.0.cmp(b.0))
    });

    rows.into_iter()
        .enumerate()
        .map(|(i, (id, total_pickups, rating))| CollectorRankEntry {
            rank: i + 1,
            user_id: id.clone(),
            username: username(store, id),
            total_pickups,
            rating,
        })
        .collect()
}
