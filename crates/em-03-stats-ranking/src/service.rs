//! Stats/Ranking Aggregator service.

use std::sync::Arc;

use em_01_entity_store::StoreService;
use shared_types::{PosterStats, Timestamp, UserStats};
use tracing::{debug, warn};

use crate::domain::{
    derive_collector_summary, derive_poster_summary, rank_collectors, rank_posters,
    CollectorRankEntry, CollectorSummary, PosterRankEntry, PosterSummary, StatsError,
};
use crate::ports::inbound::StatsApi;

/// Read-side aggregator over a shared store.
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    store: Arc<StoreService>,
}

impl StatsAggregator {
    pub fn new(store: Arc<StoreService>) -> Self {
        Self { store }
    }

    /// Compares the maintained poster stats with the history-derived ones.
    ///
    /// Returns true when they agree. `pointsThisWeek` is not compared: the
    /// maintained counter has no window.
    pub fn audit_poster(&self, poster_id: &str, now: Timestamp) -> Result<bool, StatsError> {
        let derived = self.derive_poster_summary(poster_id, now)?;
        let Some(stats) = self.poster_stats(poster_id) else {
            return Ok(derived == PosterSummary::default());
        };

        let consistent = stats.total_posts == derived.total_posts
            && stats.total_recycled == derived.total_recycled
            && stats.active_items == derived.active_items
            && stats.total_points == derived.total_points;
        if !consistent {
            warn!(
                poster = %poster_id,
                maintained_points = stats.total_points,
                derived_points = derived.total_points,
                "Poster stats drifted from history"
            );
        }
        Ok(consistent)
    }
}

impl StatsApi for StatsAggregator {
    fn collector_stats(&self, collector_id: &str) -> Option<UserStats> {
        self.store
            .read(|store| store.user_stats(collector_id).cloned())
    }

    fn poster_stats(&self, poster_id: &str) -> Option<PosterStats> {
        self.store.read(|store| store.poster_stats(poster_id).cloned())
    }

    fn poster_ranking(&self) -> Vec<PosterRankEntry> {
        let ranking = self.store.read(rank_posters);
        debug!(posters = ranking.len(), "Poster ranking computed");
        ranking
    }

    fn poster_rank(&self, poster_id: &str) -> Option<usize> {
        self.poster_ranking()
            .into_iter()
            .find(|entry| entry.user_id == poster_id)
            .map(|entry| entry.rank)
    }

    fn collector_ranking(&self) -> Vec<CollectorRankEntry> {
        self.store.read(rank_collectors)
    }

    fn derive_poster_summary(
        &self,
        poster_id: &str,
        now: Timestamp,
    ) -> Result<PosterSummary, StatsError> {
        self.store
            .read(|store| derive_poster_summary(store, poster_id, now))
    }

    fn derive_collector_summary(
        &self,
        collector_id: &str,
        now: Timestamp,
    ) -> Result<CollectorSummary, StatsError> {
        self.store
            .read(|store| derive_collector_summary(store, collector_id, now))
    }
}
