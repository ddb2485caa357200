//! In-memory persistence collaborator.
//!
//! Holds the last saved blob. Used by tests and by runtimes that do not
//! need state to outlive the process.

use parking_lot::Mutex;

use crate::domain::errors::PersistenceError;
use crate::ports::outbound::StatePersistence;

/// Blob store backed by a single in-memory slot.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blob: Mutex<Option<String>>,
    saves: Mutex<u64>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a previously saved blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            saves: Mutex::new(0),
        }
    }

    /// The blob as last saved.
    pub fn current(&self) -> Option<String> {
        self.blob.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u64 {
        *self.saves.lock()
    }
}

impl StatePersistence for InMemoryBlobStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.blob.lock().clone())
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        *self.blob.lock() = Some(blob.to_string());
        *self.saves.lock() += 1;
        Ok(())
    }
}
