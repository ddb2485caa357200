//! # Domain Layer - Entity Store Subsystem
//!
//! Pure state and rules, no I/O.
//!
//! ## Components
//!
//! - `store`: EntityStore collections, accounts, available-items derivation
//! - `snapshot`: PersistedState blob codec
//! - `seed`: documented seed data
//! - `errors`: StoreError, PersistenceError

pub mod errors;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use errors::*;
pub use seed::*;
pub use snapshot::*;
pub use store::*;
