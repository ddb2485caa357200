//! # Inbound Port - StatsApi
//!
//! Read-only lookups used by the dashboards and leaderboards.

use shared_types::{PosterStats, Timestamp, UserStats};

use crate::domain::{
    CollectorRankEntry, CollectorSummary, PosterRankEntry, PosterSummary, StatsError,
};

/// Primary API for the Stats/Ranking Aggregator. Never mutates the store.
pub trait StatsApi: Send + Sync {
    /// Collector stats as maintained by the lifecycle engine.
    fn collector_stats(&self, collector_id: &str) -> Option<UserStats>;

    /// Poster stats as maintained by the lifecycle engine.
    fn poster_stats(&self, poster_id: &str) -> Option<PosterStats>;

    /// Posters by total points, highest first.
    fn poster_ranking(&self) -> Vec<PosterRankEntry>;

    /// 1-based leaderboard position of a poster.
    fn poster_rank(&self, poster_id: &str) -> Option<usize>;

    /// Collectors by completed pickups, then rating.
    fn collector_ranking(&self) -> Vec<CollectorRankEntry>;

    /// Poster figures recomputed from posted items as of `now`.
    fn derive_poster_summary(
        &self,
        poster_id: &str,
        now: Timestamp,
    ) -> Result<PosterSummary, StatsError>;

    /// Collector figures recomputed from posted items as of `now`.
    fn derive_collector_summary(
        &self,
        collector_id: &str,
        now: Timestamp,
    ) -> Result<CollectorSummary, StatsError>;
}
