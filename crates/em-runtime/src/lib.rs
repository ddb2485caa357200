//! # EcoMatch Runtime
//!
//! Composition root for the recyclable-bag marketplace.
//!
//! ## Modular Structure
//!
//! - `container/` - AppContainer with dependency injection, AppConfig
//! - `adapters/` - JsonFileStore (production persistence)
//! - `handlers/` - RewardObserver and ActivityLog view observers
//! - `walkthrough` - scripted create → accept → complete → review demo
//!
//! ## Control Flow
//!
//! ```text
//! view action ─→ LifecycleEngine ─→ StoreService (mutate + save)
//!                      │
//!                      └─→ EventNotifier ─→ observers re-render
//!                                                │
//!                                   StatsAggregator (read-side)
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install the tracing subscriber
//! 3. Open the store (load the blob or seed it)
//! 4. Optionally reset to seed data
//! 5. Optionally run the walkthrough, then log the leaderboard

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod walkthrough;

pub use container::{AppConfig, AppContainer, ConfigError, IgnoredOverride};
pub use walkthrough::{run_walkthrough, WalkthroughReport};
