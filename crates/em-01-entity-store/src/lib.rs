//! # Entity Store Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Holds users, listings, posted items, collector stats and poster stats as
//! in-memory collections, and persists them as one opaque blob through the
//! `StatePersistence` port.
//!
//! ## Persisted Blob
//!
//! ```text
//! { users, recyclableItems, postedItems, userStats: {id: ..}, posterStats: {id: ..} }
//! ```
//!
//! The logged-in user is session state and never lands in the blob.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service.rs         - StoreService (lock + persist-on-commit)   │
//! │  adapters/memory.rs - InMemoryBlobStore                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs  - StatePersistence, TimeSource              │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/store.rs    - EntityStore collections and accounts      │
//! │  domain/snapshot.rs - PersistedState blob codec                 │
//! │  domain/seed.rs     - seed data                                 │
//! │  domain/errors.rs   - StoreError, PersistenceError              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryBlobStore;
pub use domain::*;
pub use ports::*;
pub use service::StoreService;
