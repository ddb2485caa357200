//! # Stats/Ranking Aggregator Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Read-side views over the Entity Store: stat lookups, leaderboards, and
//! summaries recomputed from item history. Nothing here mutates the store.
//!
//! ## Module Structure
//!
//! ```text
//! service.rs          - StatsAggregator (implements StatsApi)
//! ports/inbound.rs    - StatsApi
//! domain/ranking.rs   - poster and collector leaderboards
//! domain/summary.rs   - history-derived poster/collector summaries
//! domain/errors.rs    - StatsError
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::StatsApi;
pub use service::StatsAggregator;
