//! `ecomatch` - opens the marketplace store, optionally runs the demo
//! walkthrough, and logs the leaderboards.

use anyhow::{Context, Result};
use em_03_stats_ranking::StatsApi;
use em_runtime::{run_walkthrough, AppConfig, AppContainer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let (config, ignored) = AppConfig::from_env();
    init_logging(&config)?;
    for entry in &ignored {
        warn!(key = entry.key, value = %entry.value, "Ignoring unrecognised boolean");
    }

    info!("===========================================");
    info!("  EcoMatch v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!(data_file = %config.storage.data_file.display(), "Opening store");

    let container = AppContainer::open(config)?;

    if container.config.demo.run_walkthrough {
        let report = run_walkthrough(&container).context("walkthrough failed")?;
        info!(
            item_id = %report.item.id(),
            points = report.item.points(),
            rewards = report.rewards.len(),
            "Demo bag collected"
        );
    }

    for entry in container.stats.poster_ranking() {
        info!(
            rank = entry.rank,
            poster = %entry.username,
            points = entry.total_points,
            "Poster leaderboard"
        );
    }
    for entry in container.stats.collector_ranking() {
        info!(
            rank = entry.rank,
            collector = %entry.username,
            pickups = entry.total_pickups,
            rating = entry.rating,
            "Collector leaderboard"
        );
    }

    Ok(())
}
