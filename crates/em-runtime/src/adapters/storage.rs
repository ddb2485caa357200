//! # JSON File Storage Adapter
//!
//! Production `StatePersistence`: the blob lives in one JSON file.
//!
//! ## Write Path
//!
//! ```text
//! lock <file>.lock (exclusive, non-blocking)
//!   → write <file>.tmp → fsync → rename over <file>
//! unlock
//! ```
//!
//! A reader never sees a half-written file; a second process saving at the
//! same time gets `PersistenceError::Locked`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use em_01_entity_store::{PersistenceError, StatePersistence};
use fs2::FileExt;
use tracing::{debug, warn};

/// Blob store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }

    fn acquire_lock(&self) -> Result<File, PersistenceError> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.sibling("lock"))
            .map_err(io_error)?;

        lock.try_lock_exclusive().map_err(|e| {
            if e.kind() == fs2::lock_contended_error().kind() {
                PersistenceError::Locked
            } else {
                io_error(e)
            }
        })?;
        Ok(lock)
    }

    fn write_atomically(&self, blob: &str) -> io::Result<()> {
        let tmp = self.sibling("tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(blob.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)
    }
}

fn io_error(e: io::Error) -> PersistenceError {
    PersistenceError::Io(e.to_string())
}

impl StatePersistence for JsonFileStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => {
                debug!(path = %self.path.display(), bytes = blob.len(), "Loaded blob");
                Ok(Some(blob))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    fn save(&self, blob: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let lock = self.acquire_lock()?;
        let written = self.write_atomically(blob);
        if let Err(e) = fs2::FileExt::unlock(&lock) {
            warn!(path = %self.path.display(), error = %e, "Failed to release storage lock");
        }
        written.map_err(io_error)?;

        debug!(path = %self.path.display(), bytes = blob.len(), "Saved blob");
        Ok(())
    }
}
