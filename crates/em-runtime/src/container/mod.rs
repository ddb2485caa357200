//! # App Container
//!
//! Composition root holding every subsystem instance.
//!
//! ## Wiring
//!
//! ```text
//! StatePersistence ─→ StoreService ─┬─→ LifecycleEngine ─publish─→ EventNotifier
//!                                   └─→ StatsAggregator                 │
//!                                                           RewardObserver, ActivityLog
//! ```
//!
//! The notifier belongs to the container, so subscriptions survive
//! `reset_app`; observers are removed with `detach` or `EventNotifier::clear`.

pub mod config;

use std::sync::Arc;

use em_01_entity_store::{StatePersistence, StoreError, StoreService, SystemTimeSource, TimeSource};
use em_02_lifecycle::{LifecycleApi, LifecycleEngine};
use em_03_stats_ranking::StatsAggregator;
use shared_bus::EventNotifier;
use tracing::{info, instrument};

use crate::adapters::JsonFileStore;

pub use config::{
    AppConfig, ConfigError, DemoConfig, IgnoredOverride, LoggingConfig, StorageConfig,
};

/// All subsystem instances for one client.
pub struct AppContainer {
    pub config: AppConfig,
    pub store: Arc<StoreService>,
    pub notifier: Arc<EventNotifier>,
    pub lifecycle: Arc<LifecycleEngine>,
    pub stats: Arc<StatsAggregator>,
}

impl AppContainer {
    /// Builds every subsystem on top of `persistence`, loading the stored
    /// blob or seeding when there is none.
    pub fn new(
        config: AppConfig,
        persistence: Arc<dyn StatePersistence>,
    ) -> Result<Self, StoreError> {
        Self::with_clock(config, persistence, Arc::new(SystemTimeSource))
    }

    #[instrument(skip_all)]
    pub fn with_clock(
        config: AppConfig,
        persistence: Arc<dyn StatePersistence>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, StoreError> {
        let store = Arc::new(StoreService::open(persistence, clock)?);
        let notifier = Arc::new(EventNotifier::new());
        let lifecycle = Arc::new(LifecycleEngine::new(store.clone(), notifier.clone()));
        let stats = Arc::new(StatsAggregator::new(store.clone()));

        if config.storage.reset_on_start {
            lifecycle.reset_app();
        }

        info!(
            reset_on_start = config.storage.reset_on_start,
            "Container initialized"
        );
        Ok(Self {
            config,
            store,
            notifier,
            lifecycle,
            stats,
        })
    }

    /// Opens the container on the JSON file named by the config.
    #[instrument(skip_all, fields(data_file = %config.storage.data_file.display()))]
    pub fn open(config: AppConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        config.validate().context("invalid configuration")?;
        let persistence = Arc::new(JsonFileStore::new(config.storage.data_file.clone()));
        Self::new(config, persistence).context("failed to open the entity store")
    }
}

impl std::fmt::Debug for AppContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContainer")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
