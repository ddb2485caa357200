//! Lifecycle error types.
//!
//! Not-found and wrong-state outcomes are expected results that callers
//! branch on, not faults.

use shared_types::{
    ItemId, ItemStatus, ItemValidationError, TransitionError, UserId, UserRole,
};
use thiserror::Error;

/// Lifecycle Engine error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    /// Referenced item or user does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Transition attempted from the wrong state.
    #[error("Item {item_id} is {actual}, expected {expected}")]
    InvalidState {
        item_id: ItemId,
        expected: ItemStatus,
        actual: ItemStatus,
    },

    /// Posters list bags and collectors accept them.
    #[error("User {user_id} is {actual}, must be {required}")]
    WrongRole {
        user_id: UserId,
        required: UserRole,
        actual: UserRole,
    },

    /// Only the collector who accepted an item may complete it.
    #[error("Collector {collector_id} is not assigned to item {item_id}")]
    NotAssignee { item_id: ItemId, collector_id: UserId },

    /// The item draft failed validation.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ItemValidationError),

    /// Scanned code is not an EcoMatch pickup code.
    #[error("Invalid pickup code: {0}")]
    InvalidPickupCode(String),

    /// Ratings run from 1 to 5.
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// The collector for this item was already rated.
    #[error("Item {item_id} was already reviewed")]
    AlreadyReviewed { item_id: ItemId },
}

impl LifecycleError {
    pub fn item_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "Item",
            id: id.to_string(),
        }
    }

    pub fn user_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "User",
            id: id.to_string(),
        }
    }

    pub fn invalid_state(item_id: &str, err: TransitionError) -> Self {
        Self::InvalidState {
            item_id: item_id.to_string(),
            expected: err.expected,
            actual: err.actual,
        }
    }

    /// True for the expected "no such entity" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for the expected "wrong state" outcome.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}
