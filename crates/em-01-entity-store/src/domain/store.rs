//! # Entity Store
//!
//! In-memory collections for users, listings, posted items and stats.
//!
//! ## Collections
//!
//! - `users`: registration order
//! - `recyclable_items`: raw listings, one per posting
//! - `posted_items`: listings with lifecycle state, creation order
//! - `user_stats` / `poster_stats`: keyed by user id
//!
//! The store itself is single-threaded; `StoreService` wraps it in a lock
//! and persists every committed mutation.

use std::collections::BTreeMap;

use shared_types::{
    ItemId, PostedItem, PosterStats, RecyclableItem, Timestamp, User, UserId, UserRole, UserStats,
};

use super::errors::StoreError;
use super::seed::seed_state;
use super::snapshot::PersistedState;

/// All marketplace state for one client instance.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    users: Vec<User>,
    recyclable_items: Vec<RecyclableItem>,
    posted_items: Vec<PostedItem>,
    user_stats: BTreeMap<UserId, UserStats>,
    poster_stats: BTreeMap<UserId, PosterStats>,

    /// Logged-in user. Session state, not persisted.
    current_user: Option<UserId>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the seed data.
    pub fn seeded() -> Self {
        Self::from_snapshot(seed_state())
    }

    /// Rebuilds a store from a persisted snapshot. No user is logged in.
    pub fn from_snapshot(state: PersistedState) -> Self {
        Self {
            users: state.users,
            recyclable_items: state.recyclable_items,
            posted_items: state.posted_items,
            user_stats: state.user_stats,
            poster_stats: state.poster_stats,
            current_user: None,
        }
    }

    /// Copies the persistent part of the store.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            users: self.users.clone(),
            recyclable_items: self.recyclable_items.clone(),
            posted_items: self.posted_items.clone(),
            user_stats: self.user_stats.clone(),
            poster_stats: self.poster_stats.clone(),
        }
    }

    /// Clears every collection back to seed data and logs out.
    pub fn reset_to_seed(&mut self) {
        *self = Self::seeded();
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Case-insensitive username lookup.
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username.trim()))
    }

    /// Adds a new account with role `Unset`.
    ///
    /// # Errors
    /// - `DuplicateEntity` if the username is taken (case-insensitive)
    pub fn register(
        &mut self,
        id: UserId,
        username: &str,
        password: &str,
        now: Timestamp,
    ) -> Result<User, StoreError> {
        let username = username.trim();
        if self.user_by_username(username).is_some() {
            return Err(StoreError::DuplicateEntity {
                username: username.to_string(),
            });
        }

        let user = User {
            id,
            username: username.to_string(),
            password: password.to_string(),
            role: UserRole::Unset,
            display_photo: None,
            created_at: now,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Checks credentials and makes the user current.
    ///
    /// # Errors
    /// - `InvalidCredentials` for an unknown username or wrong password
    pub fn login(&mut self, username: &str, password: &str) -> Result<User, StoreError> {
        let user = self
            .user_by_username(username)
            .filter(|u| u.password == password)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;

        self.current_user = Some(user.id.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.current_user = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_deref().and_then(|id| self.user(id))
    }

    /// Assigns the user's role once and creates the matching stats record.
    ///
    /// # Errors
    /// - `NotFound` if the user does not exist
    /// - `RoleUnset` if `role` is `Unset`
    /// - `RoleAlreadyAssigned` if the user already has a role
    pub fn assign_role(&mut self, user_id: &str, role: UserRole) -> Result<User, StoreError> {
        if role == UserRole::Unset {
            return Err(StoreError::RoleUnset);
        }

        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::user_not_found(user_id))?;

        if user.role != UserRole::Unset {
            return Err(StoreError::RoleAlreadyAssigned {
                user_id: user.id.clone(),
                role: user.role,
            });
        }
        user.role = role;
        let user = user.clone();

        match role {
            UserRole::Collector => {
                self.user_stats.entry(user.id.clone()).or_default();
            }
            UserRole::Poster => {
                self.poster_stats.entry(user.id.clone()).or_default();
            }
            UserRole::Unset => {}
        }
        Ok(user)
    }

    /// Replaces the user's display photo.
    pub fn update_display_photo(
        &mut self,
        user_id: &str,
        photo: Option<String>,
    ) -> Result<User, StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::user_not_found(user_id))?;
        user.display_photo = photo;
        Ok(user.clone())
    }

    // =========================================================================
    // ITEMS
    // =========================================================================

    pub fn posted_items(&self) -> &[PostedItem] {
        &self.posted_items
    }

    pub fn recyclable_items(&self) -> &[RecyclableItem] {
        &self.recyclable_items
    }

    pub fn posted_item(&self, id: &str) -> Option<&PostedItem> {
        self.posted_items.iter().find(|p| p.id() == id)
    }

    pub fn posted_item_mut(&mut self, id: &str) -> Option<&mut PostedItem> {
        self.posted_items.iter_mut().find(|p| p.id() == id)
    }

    /// Appends a posting and its available listing.
    pub fn insert_posting(&mut self, item: PostedItem) {
        self.recyclable_items.push(item.listing.clone());
        self.posted_items.push(item);
    }

    /// Listings a collector may still accept.
    ///
    /// A listing is available iff it has no posting or its posting is Active.
    /// Recomputed on every call.
    pub fn available_items(&self) -> Vec<RecyclableItem> {
        self.recyclable_items
            .iter()
            .filter(|listing| {
                self.posted_item(&listing.id)
                    .map_or(true, PostedItem::is_active)
            })
            .cloned()
            .collect()
    }

    pub fn items_posted_by(&self, poster_id: &str) -> Vec<PostedItem> {
        self.posted_items
            .iter()
            .filter(|p| p.posted_by_user_id == poster_id)
            .cloned()
            .collect()
    }

    pub fn items_accepted_by(&self, collector_id: &str) -> Vec<PostedItem> {
        self.posted_items
            .iter()
            .filter(|p| p.accepted_by.as_deref() == Some(collector_id))
            .cloned()
            .collect()
    }

    // =========================================================================
    // STATS
    // =========================================================================

    pub fn user_stats(&self, id: &str) -> Option<&UserStats> {
        self.user_stats.get(id)
    }

    /// Collector stats, created with defaults on first use.
    pub fn user_stats_entry(&mut self, id: &str) -> &mut UserStats {
        self.user_stats.entry(id.to_string()).or_default()
    }

    pub fn all_user_stats(&self) -> &BTreeMap<UserId, UserStats> {
        &self.user_stats
    }

    pub fn poster_stats(&self, id: &str) -> Option<&PosterStats> {
        self.poster_stats.get(id)
    }

    /// Poster stats, created with defaults on first use.
    pub fn poster_stats_entry(&mut self, id: &str) -> &mut PosterStats {
        self.poster_stats.entry(id.to_string()).or_default()
    }

    pub fn all_poster_stats(&self) -> &BTreeMap<UserId, PosterStats> {
        &self.poster_stats
    }

    /// Ids of every posting, in creation order.
    pub fn posted_item_ids(&self) -> Vec<ItemId> {
        self.posted_items.iter().map(|p| p.id().clone()).collect()
    }
}
