//! # View Observers
//!
//! Event handlers standing in for the poster and collector views.

pub mod activity;
pub mod rewards;

pub use activity::{ActivityEntry, ActivityLog};
pub use rewards::{RewardNotification, RewardObserver};
