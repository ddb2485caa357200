//! Entity Store Service
//!
//! Wraps the `EntityStore` in a lock, hands mutations a consistent
//! timestamp, and persists the snapshot after every committed mutation.
//!
//! ```text
//! caller ──transact(f)──→ [write lock] ─→ f(&mut store, now) ─Ok─→ save(blob)
//!                                                  │
//!                                                  └─Err─→ nothing persisted
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::{Timestamp, User, UserRole};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::snapshot::PersistedState;
use crate::domain::store::EntityStore;
use crate::ports::outbound::{StatePersistence, TimeSource};

/// Shared handle to the marketplace state.
pub struct StoreService {
    store: RwLock<EntityStore>,
    persistence: Arc<dyn StatePersistence>,
    clock: Arc<dyn TimeSource>,
}

impl StoreService {
    /// Loads the persisted blob, or seeds and saves when nothing is stored.
    ///
    /// # Errors
    /// - `Corrupt` if the stored blob cannot be decoded
    /// - `Persistence` if the collaborator fails
    pub fn open(
        persistence: Arc<dyn StatePersistence>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, StoreError> {
        let store = match persistence.load()? {
            Some(blob) => {
                let state = PersistedState::from_blob(&blob)?;
                info!(
                    users = state.users.len(),
                    posted_items = state.posted_items.len(),
                    "Loaded persisted state"
                );
                EntityStore::from_snapshot(state)
            }
            None => {
                let store = EntityStore::seeded();
                persistence.save(&store.snapshot().to_blob()?)?;
                info!("No persisted state, seeded store");
                store
            }
        };

        Ok(Self {
            store: RwLock::new(store),
            persistence,
            clock,
        })
    }

    /// Runs a read-only view over the store.
    pub fn read<T>(&self, f: impl FnOnce(&EntityStore) -> T) -> T {
        f(&self.store.read())
    }

    /// Runs a mutation under the write lock and persists it on success.
    ///
    /// `f` must leave the store untouched when it returns `Err`. A failed
    /// save is logged; the in-memory mutation stands.
    pub fn transact<T, E>(
        &self,
        f: impl FnOnce(&mut EntityStore, Timestamp) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut store = self.store.write();
        let value = f(&mut store, self.clock.now())?;
        self.persist_locked(&store);
        Ok(value)
    }

    fn persist_locked(&self, store: &EntityStore) {
        let saved = store
            .snapshot()
            .to_blob()
            .and_then(|blob| self.persistence.save(&blob).map_err(StoreError::from));
        match saved {
            Ok(()) => debug!("Persisted store snapshot"),
            Err(e) => error!(error = %e, "Failed to persist store snapshot"),
        }
    }

    /// Persists the current state explicitly.
    pub fn save(&self) -> Result<(), StoreError> {
        let store = self.store.read();
        let blob = store.snapshot().to_blob()?;
        self.persistence.save(&blob)?;
        Ok(())
    }

    /// Restores seed data, logs out, and persists.
    pub fn reset(&self) {
        let mut store = self.store.write();
        store.reset_to_seed();
        self.persist_locked(&store);
        info!("Store reset to seed data");
    }

    pub fn clock(&self) -> &Arc<dyn TimeSource> {
        &self.clock
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn snapshot(&self) -> PersistedState {
        self.read(EntityStore::snapshot)
    }

    // =========================================================================
    // ACCOUNTS
    // =========================================================================

    /// Registers a new account with a fresh id and role `Unset`.
    pub fn register(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let user = self.transact(|store, now| {
            store.register(Uuid::new_v4().to_string(), username, password, now)
        })?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let user = self.store.write().login(username, password)?;
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    pub fn logout(&self) {
        self.store.write().logout();
    }

    pub fn current_user(&self) -> Option<User> {
        self.read(|store| store.current_user().cloned())
    }

    pub fn assign_role(&self, user_id: &str, role: UserRole) -> Result<User, StoreError> {
        let user = self.transact(|store, _| store.assign_role(user_id, role))?;
        info!(user_id = %user.id, role = %role, "Role assigned");
        Ok(user)
    }

    pub fn update_display_photo(
        &self,
        user_id: &str,
        photo: Option<String>,
    ) -> Result<User, StoreError> {
        self.transact(|store, _| store.update_display_photo(user_id, photo))
    }
}

impl std::fmt::Debug for StoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.read();
        f.debug_struct("StoreService")
            .field("users", &store.users().len())
            .field("posted_items", &store.posted_items().len())
            .finish()
    }
}
