//! Voting Error Types
//!
//! Errors surfaced by vote operations. A vote blocked by a quota is NOT an
//! error: the outcome is carried in the receipt so callers can still render
//! the current counts.

use super::model::{CategoryId, TopicId, UserId};

/// Error types for vote operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    /// Voting is not allowed on this topic
    #[error("topic {0} is not open to voting")]
    IneligibleTopic(TopicId),

    /// Referenced topic does not exist
    #[error("topic not found: {0}")]
    TopicNotFound(TopicId),

    /// Referenced category does not exist
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Referenced user does not exist
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}
