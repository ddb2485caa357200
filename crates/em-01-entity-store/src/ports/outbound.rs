//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the Entity Store needs from the host application.
//!
//! Production: `JsonFileStore` (em-runtime/adapters/storage.rs)
//! Testing: `InMemoryBlobStore` (adapters/memory.rs), `MockTimeSource` (below)

use chrono::Duration;
use parking_lot::Mutex;
use shared_types::Timestamp;

use crate::domain::errors::PersistenceError;

/// Opaque key-value persistence for the serialized store.
///
/// The blob is produced and consumed by the store; implementations never
/// inspect it.
pub trait StatePersistence: Send + Sync {
    /// Load the last saved blob, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the saved blob.
    fn save(&self, blob: &str) -> Result<(), PersistenceError>;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        chrono::Utc::now()
    }
}

/// Settable clock for tests and scripted walkthroughs.
#[derive(Debug)]
pub struct MockTimeSource {
    time: Mutex<Timestamp>,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: Mutex::new(initial),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock();
        *time += by;
    }

    pub fn set(&self, time: Timestamp) {
        *self.time.lock() = time;
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        *self.time.lock()
    }
}
