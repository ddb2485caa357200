//! Adapters layer for the Entity Store subsystem.
//!
//! In-process implementations of the outbound ports.

pub mod memory;

pub use memory::InMemoryBlobStore;
