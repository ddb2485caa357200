//! # Runtime Adapters
//!
//! Production implementations of subsystem outbound ports.

pub mod storage;

pub use storage::JsonFileStore;
