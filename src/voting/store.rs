//! Ledger Store
//!
//! In-memory storage for per-user ledgers and the per-topic voter index.
//!
//! Each user's ledger sits behind its own lock; the vote service holds that
//! lock across the count-read, quota check, and mutation so two concurrent
//! requests from the same user cannot both pass the gate on a stale count.
//! Requests from different users take different locks and never contend.
//!
//! The voter index maps each topic to the users voting for it and is the
//! source of fresh vote counts (a recount, never a cached delta).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::ledger::UserLedger;
use super::model::{TopicId, UserId};

/// In-memory ledger store
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    /// One ledger per user, each behind its own lock
    ledgers: Arc<RwLock<HashMap<UserId, Arc<Mutex<UserLedger>>>>>,

    /// Per-topic voter index
    voters: Arc<RwLock<HashMap<TopicId, HashSet<UserId>>>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the ledger handle for a user. The caller locks the
    /// returned handle for the duration of one check-and-mutate sequence.
    pub async fn ledger(&self, user: UserId) -> Arc<Mutex<UserLedger>> {
        let mut ledgers = self.ledgers.write().await;
        ledgers
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(UserLedger::new())))
            .clone()
    }

    /// Number of users with a ledger
    pub async fn user_count(&self) -> usize {
        self.ledgers.read().await.len()
    }

    /// Mark `user` as a voter on `topic`
    pub async fn record_voter(&self, topic: TopicId, user: UserId) {
        let mut voters = self.voters.write().await;
        voters.entry(topic).or_default().insert(user);
    }

    /// Remove `user` from `topic`'s voters
    pub async fn remove_voter(&self, topic: TopicId, user: UserId) {
        let mut voters = self.voters.write().await;
        if let Some(set) = voters.get_mut(&topic) {
            set.remove(&user);
            if set.is_empty() {
                voters.remove(&topic);
            }
        }
    }

    /// Users currently voting for a topic, in stable order
    pub async fn voters_of(&self, topic: TopicId) -> Vec<UserId> {
        let voters = self.voters.read().await;
        let mut ids: Vec<UserId> = voters
            .get(&topic)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Fresh vote count for a topic, recounted from the voter index
    pub async fn vote_count(&self, topic: TopicId) -> u64 {
        let voters = self.voters.read().await;
        voters.get(&topic).map_or(0, |set| set.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ledger_handle_is_shared() {
        let store = LedgerStore::new();

        let first = store.ledger(1).await;
        first.lock().await.add(10, 1);

        let second = store.ledger(1).await;
        assert!(second.lock().await.is_active(10));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_ledgers_are_per_user() {
        let store = LedgerStore::new();

        store.ledger(1).await.lock().await.add(10, 1);
        store.ledger(2).await.lock().await.add(11, 1);

        assert!(!store.ledger(2).await.lock().await.is_active(10));
        assert_eq!(store.user_count().await, 2);
    }

    #[tokio::test]
    async fn test_voter_index_counts_fresh() {
        let store = LedgerStore::new();

        store.record_voter(10, 1).await;
        store.record_voter(10, 2).await;
        // A repeat vote from the same user must not double-count.
        store.record_voter(10, 2).await;

        assert_eq!(store.vote_count(10).await, 2);
        assert_eq!(store.voters_of(10).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_remove_voter() {
        let store = LedgerStore::new();

        store.record_voter(10, 1).await;
        store.record_voter(10, 2).await;
        store.remove_voter(10, 1).await;

        assert_eq!(store.voters_of(10).await, vec![2]);
        assert_eq!(store.vote_count(10).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_topic_has_no_voters() {
        let store = LedgerStore::new();
        assert_eq!(store.vote_count(99).await, 0);
        assert!(store.voters_of(99).await.is_empty());
    }
}
