//! # Shared Types Crate
//!
//! This crate contains all domain entities shared by the EcoMatch subsystems:
//! accounts, listings, posted items with their lifecycle state, and the
//! collector/poster statistics.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Derived Values Are Computed Once**: `total_weight` and `points` are derived
//!   from materials when a listing is created (see [`points`]).
//! - **Explicit Ownership**: Every posted item records `posted_by_user_id`; points
//!   are credited to that user and no other.

pub mod entities;
pub mod errors;
pub mod modal;
pub mod points;

pub use entities::*;
pub use errors::*;
pub use modal::PickupModal;
pub use points::{calculate_points, round_to_tenth, total_weight};
