//! Vote Notification Events
//!
//! Ledger mutations emit fire-and-forget events so the host platform can
//! fan out alerts or feed activity streams. Nothing is consumed back from
//! the sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::model::{TopicId, UserId};

/// Kind of ledger mutation an event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteEventKind {
    VoteAdded,
    VoteRemoved,
}

/// A single vote mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteEvent {
    /// Unique event ID
    pub id: Uuid,

    /// What happened
    pub kind: VoteEventKind,

    /// The user whose ledger changed
    pub user_id: UserId,

    /// The topic the vote applies to
    pub topic_id: TopicId,

    /// When the mutation happened
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl VoteEvent {
    pub fn added(user_id: UserId, topic_id: TopicId) -> Self {
        Self::new(VoteEventKind::VoteAdded, user_id, topic_id)
    }

    pub fn removed(user_id: UserId, topic_id: TopicId) -> Self {
        Self::new(VoteEventKind::VoteRemoved, user_id, topic_id)
    }

    fn new(kind: VoteEventKind, user_id: UserId, topic_id: TopicId) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user_id,
            topic_id,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Sink for vote events
///
/// Trait object so the service can run against the log in production and
/// against a recording sink in tests.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn emit(&self, event: VoteEvent);
}

/// Notifier that writes events to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn emit(&self, event: VoteEvent) {
        info!(
            "Vote event {:?}: user {} topic {} ({})",
            event.kind, event.user_id, event.topic_id, event.id
        );
    }
}
