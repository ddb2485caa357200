//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

use crate::entities::ItemStatus;

/// Rejected item drafts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemValidationError {
    /// Title is empty or whitespace.
    #[error("Item title must not be blank")]
    BlankTitle,

    /// A bag needs at least one material line.
    #[error("Item must list at least one material")]
    NoMaterials,

    /// A material line has zero units.
    #[error("Material #{index} has zero quantity")]
    ZeroQuantity { index: usize },

    /// A material line has a non-positive or non-finite unit weight.
    #[error("Material #{index} has invalid unit weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },

    /// A unit heavier than `MAX_UNIT_WEIGHT_KG`.
    #[error("Material #{index} unit weight {weight} kg exceeds the limit")]
    UnitTooHeavy { index: usize, weight: f64 },

    /// The whole bag is heavier than `MAX_BAG_WEIGHT_KG`.
    #[error("Bag weight {total} kg exceeds the limit")]
    BagTooHeavy { total: f64 },
}

/// A state transition attempted from the wrong state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Item is {actual}, expected {expected}")]
pub struct TransitionError {
    pub expected: ItemStatus,
    pub actual: ItemStatus,
}
