//! Entity Store error types.

use shared_types::{UserId, UserRole};
use thiserror::Error;

/// Errors raised by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Underlying read or write failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Another process holds the storage lock.
    #[error("Storage is locked by another process")]
    Locked,
}

/// Entity Store error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Registration with a username that is already taken.
    #[error("Username already taken: {username}")]
    DuplicateEntity { username: String },

    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Login with an unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Role is assigned once and is immutable afterwards.
    #[error("User {user_id} already has role {role}")]
    RoleAlreadyAssigned { user_id: UserId, role: UserRole },

    /// Assigning `Unset` is meaningless.
    #[error("Role must be collector or poster")]
    RoleUnset,

    /// The persisted blob could not be decoded.
    #[error("Stored state is corrupt: {0}")]
    Corrupt(String),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn user_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "User",
            id: id.to_string(),
        }
    }
}
