//! # Domain Layer - Stats/Ranking Aggregator
//!
//! Pure read-side views over the Entity Store.

pub mod errors;
pub mod ranking;
pub mod summary;

pub use errors::*;
pub use ranking::*;
pub use summary::*;
