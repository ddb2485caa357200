//! # Persisted State (Snapshot Blob)
//!
//! The whole store is persisted as one JSON document:
//!
//! ```text
//! { users: User[], recyclableItems: RecyclableItem[], postedItems: PostedItem[],
//!   userStats: {[userId]: UserStats}, posterStats: {[userId]: PosterStats} }
//! ```
//!
//! Date fields are RFC 3339 strings and come back as `DateTime<Utc>` on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{PostedItem, PosterStats, RecyclableItem, User, UserId, UserStats};

use super::errors::StoreError;

/// Serializable image of the Entity Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub recyclable_items: Vec<RecyclableItem>,
    #[serde(default)]
    pub posted_items: Vec<PostedItem>,
    #[serde(default)]
    pub user_stats: BTreeMap<UserId, UserStats>,
    #[serde(default)]
    pub poster_stats: BTreeMap<UserId, PosterStats>,
}

impl PersistedState {
    /// Encode as the JSON blob handed to the persistence collaborator.
    pub fn to_blob(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Decode a blob produced by [`to_blob`](Self::to_blob).
    pub fn from_blob(blob: &str) -> Result<Self, StoreError> {
        serde_json::from_str(blob).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}
