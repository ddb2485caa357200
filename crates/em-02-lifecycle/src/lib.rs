//! # Lifecycle Engine Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Enforces the posted-item state machine and applies the stat side effects
//! of every transition, then notifies the views through the shared bus.
//!
//! ```text
//! [ACTIVE] ──accept──→ [ACCEPTED] ──complete──→ [COMPLETED]
//!    │
//!    └── reject: hidden from one collector's candidates, state unchanged
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Single acceptance | `domain/transitions.rs` `accept_posting()` under the store write lock |
//! | Points credited only on completion, to the owner | `domain/transitions.rs` `complete_posting()` |
//! | `activeItems` never below zero | `complete_posting()` saturating decrement |
//! | Failed transitions change nothing | checks precede writes in every transition |
//!
//! ## Events
//!
//! | Operation | Topic |
//! |-----------|-------|
//! | `create_item` | `itemCreated` |
//! | `accept_item` | `itemAccepted` |
//! | `complete_pickup` | `itemCollected` |
//!
//! Events are published after the store lock is released.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::LifecycleApi;
pub use service::LifecycleEngine;
