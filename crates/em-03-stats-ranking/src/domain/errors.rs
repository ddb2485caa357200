//! Stats/Ranking error types.

use shared_types::UserId;
use thiserror::Error;

/// Stats/Ranking Aggregator error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Summaries are only derived for registered users.
    #[error("User not found: {0}")]
    UserNotFound(UserId),
}
