//! Scripted demo: one bag from listing to review.
//!
//! ```text
//! maria lists a bag ─→ alex accepts ─→ alex scans the QR code ─→ maria rates alex
//! ```

use anyhow::{bail, Context, Result};
use em_01_entity_store::SEED_PASSWORD;
use em_02_lifecycle::LifecycleApi;
use em_03_stats_ranking::StatsApi;
use shared_types::{ItemDraft, Location, Material, MaterialType, PickupModal, PostedItem};
use tracing::info;

use crate::container::AppContainer;
use crate::handlers::{ActivityLog, RewardNotification, RewardObserver};

/// What the walkthrough did.
#[derive(Debug, Clone)]
pub struct WalkthroughReport {
    pub item: PostedItem,
    pub rewards: Vec<RewardNotification>,
    pub events: usize,
    pub poster_rank: Option<usize>,
}

fn demo_draft() -> ItemDraft {
    ItemDraft {
        title: "Soda cans and a broken kettle".into(),
        description: "Crushed aluminium cans plus an old steel kettle".into(),
        image: None,
        materials: vec![
            Material::new(MaterialType::Metal, 24, 0.015),
            Material::new(MaterialType::Metal, 1, 0.9),
        ],
        location: Location {
            address: "12 Green St".into(),
            distance: 1.2,
        },
    }
}

pub fn run_walkthrough(container: &AppContainer) -> Result<WalkthroughReport> {
    let rewards = RewardObserver::attach(container.notifier.clone());
    let activity = ActivityLog::attach(container.notifier.clone());
    let lifecycle = &container.lifecycle;

    let poster = container
        .store
        .login("maria", SEED_PASSWORD)
        .context("poster login")?;
    let item = lifecycle
        .create_item(demo_draft(), &poster.id)
        .context("create item")?;
    let item_id = item.id().clone();
    info!(item_id = %item_id, points = item.points(), "Listed demo bag");

    let collector = container
        .store
        .login("alex", SEED_PASSWORD)
        .context("collector login")?;
    lifecycle
        .accept_item(&item_id, &collector.id)
        .context("accept item")?;

    let code = lifecycle.pickup_code(&item_id).context("pickup code")?;
    lifecycle
        .complete_pickup_with_code(&code, &collector.id)
        .context("complete pickup")?;

    container
        .store
        .login("maria", SEED_PASSWORD)
        .context("poster login")?;
    match lifecycle.pickup_modal(&item_id).context("pickup modal")? {
        PickupModal::ReviewCollector { rating: None, .. } => {}
        other => bail!("unexpected pickup modal: {:?}", other),
    }
    let item = lifecycle
        .review_collector(&item_id, 5)
        .context("review collector")?;
    container.store.logout();

    let events = activity.entries().len();
    activity.detach();
    let rewards = rewards.detach();
    let poster_rank = container.stats.poster_rank(&poster.id);

    info!(
        item_id = %item_id,
        collector = %collector.id,
        events,
        poster_rank = ?poster_rank,
        "Walkthrough finished"
    );
    Ok(WalkthroughReport {
        item,
        rewards,
        events,
        poster_rank,
    })
}
