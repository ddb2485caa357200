//! Ports layer for the Stats/Ranking Aggregator.

pub mod inbound;

pub use inbound::*;
