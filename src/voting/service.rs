//! Vote Service
//!
//! Orchestrates one add/remove request end to end: entity lookups,
//! eligibility, limit resolution, the atomic ledger mutation, the
//! vote-count recompute, notification emission, and receipt assembly.
//!
//! Per (user, topic) pair the legal transitions are
//! `NotVoted -> Voted -> Archived`, plus `Archived -> Voted` (restore) and
//! `Voted -> NotVoted` (removal). `Archived -> NotVoted` is not directly
//! exposed; restoration passes back through `Voted`.

use std::sync::Arc;
use tokio::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics;

use super::catalog::Catalog;
use super::config::VotingConfig;
use super::eligibility::EligibilityGuard;
use super::error::VoteError;
use super::events::{Notifier, VoteEvent};
use super::ledger::UserLedger;
use super::limits::LimitResolver;
use super::model::{Category, CategoryId, TopicId, UserId};
use super::store::LedgerStore;

/// Outcome of one add/remove request.
///
/// Produced for quota-blocked adds as well: the caller renders current
/// counts regardless of whether the vote went through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// Whether the user's site-wide quota is now reached
    pub user_votes_exceeded: bool,

    /// Whether the user holds a vote on the topic after this request
    pub user_voted: bool,

    /// The limit that gated this request
    pub vote_limit: u32,

    /// The topic's cached vote count
    pub vote_count: u64,

    /// Users currently voting for the topic
    pub who_voted: Vec<UserId>,

    /// Whether the user should be alerted about low remaining votes
    pub alert: bool,

    /// Votes the user may still cast against the gating limit
    pub votes_left: u32,

    /// Whether the category quota is now reached; present only when a
    /// category override applies to this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_votes_exceeded: Option<bool>,
}

/// One user's vote standing within one category, as category listings
/// display it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryVoteStatus {
    /// Whether a category override applies to this user
    pub has_vote_limit: bool,

    /// Whether the category quota is reached; present only when an
    /// override applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes_exceeded: Option<bool>,

    /// The limit that applies to this user in this category
    pub vote_limit: u32,
}

/// Orchestrates vote mutations against the ledger store
#[derive(Clone)]
pub struct VoteService {
    config: Arc<RwLock<VotingConfig>>,
    catalog: Catalog,
    store: LedgerStore,
    guard: EligibilityGuard,
    notifier: Arc<dyn Notifier>,
}

impl VoteService {
    pub fn new(config: VotingConfig, catalog: Catalog, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            catalog,
            store: LedgerStore::new(),
            guard: EligibilityGuard::new(),
            notifier,
        }
    }

    /// Registry handle, shared with the admin surface
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the voting configuration at runtime
    pub async fn update_config(&self, config: VotingConfig) {
        let mut current = self.config.write().await;
        *current = config;
    }

    /// Snapshot of the current voting configuration
    pub async fn get_config(&self) -> VotingConfig {
        self.config.read().await.clone()
    }

    /// Cast a vote for a topic.
    ///
    /// Fails for unknown entities and for topics that are not votable at
    /// all. A vote blocked by the applicable quota is NOT a failure: the
    /// receipt comes back with `user_voted: false` and current counts.
    pub async fn add_vote(
        &self,
        user_id: UserId,
        topic_id: TopicId,
    ) -> Result<VoteReceipt, VoteError> {
        let user = self.catalog.user(user_id).await?;
        let topic = self.catalog.topic(topic_id).await?;
        let category = self.catalog.category(topic.category_id).await?;
        let config = self.config.read().await.clone();

        if !self.guard.can_vote(&config, &topic, &category) {
            return Err(VoteError::IneligibleTopic(topic_id));
        }

        let resolver = LimitResolver::new(config.tier_limits.clone());
        let global_limit = resolver.global_limit(user.trust_tier);
        let category_limit = resolver.effective_category_limit(user.trust_tier, &category);

        // The ledger stays locked across the count read, the quota check,
        // and the mutation: two concurrent requests from one user cannot
        // both pass the gate on a stale count.
        let handle = self.store.ledger(user_id).await;
        let mut ledger = handle.lock().await;

        let already_voted = ledger.is_active(topic_id);
        let gate_reached = match category_limit {
            Some(limit) => ledger.reached_category_limit(category.id, limit),
            None => ledger.reached_global_limit(global_limit),
        };

        let recorded = if already_voted || gate_reached {
            false
        } else {
            ledger.add(topic_id, category.id)
        };

        let vote_count = if recorded {
            self.store.record_voter(topic_id, user_id).await;
            let count = self.store.vote_count(topic_id).await;
            self.catalog.set_vote_count(topic_id, count).await;
            metrics::VOTES_ADDED_TOTAL.inc();
            metrics::ACTIVE_VOTES.inc();
            self.notifier
                .emit(VoteEvent::added(user_id, topic_id))
                .await;
            count
        } else {
            if !already_voted {
                debug!(
                    "Vote by user {} on topic {} blocked at limit",
                    user_id, topic_id
                );
                metrics::VOTES_REJECTED_TOTAL.inc();
            }
            topic.vote_count
        };

        let who_voted = self.store.voters_of(topic_id).await;

        Ok(self.build_receipt(
            &ledger,
            &category,
            category_limit,
            global_limit,
            config.alert_votes_left,
            already_voted || recorded,
            vote_count,
            who_voted,
        ))
    }

    /// Withdraw a vote from a topic.
    ///
    /// Idempotent: removing a vote that was never cast succeeds and leaves
    /// the ledger unchanged. Removal is never blocked by a quota and the
    /// receipt always reports `user_voted: false`.
    pub async fn remove_vote(
        &self,
        user_id: UserId,
        topic_id: TopicId,
    ) -> Result<VoteReceipt, VoteError> {
        let user = self.catalog.user(user_id).await?;
        let topic = self.catalog.topic(topic_id).await?;
        let category = self.catalog.category(topic.category_id).await?;
        let config = self.config.read().await.clone();

        let resolver = LimitResolver::new(config.tier_limits.clone());
        let global_limit = resolver.global_limit(user.trust_tier);
        let category_limit = resolver.effective_category_limit(user.trust_tier, &category);

        let handle = self.store.ledger(user_id).await;
        let mut ledger = handle.lock().await;

        let removed = ledger.remove(topic_id, category.id);

        let vote_count = if removed {
            self.store.remove_voter(topic_id, user_id).await;
            let count = self.store.vote_count(topic_id).await;
            self.catalog.set_vote_count(topic_id, count).await;
            metrics::VOTES_REMOVED_TOTAL.inc();
            metrics::ACTIVE_VOTES.dec();
            self.notifier
                .emit(VoteEvent::removed(user_id, topic_id))
                .await;
            count
        } else {
            topic.vote_count
        };

        let who_voted = self.store.voters_of(topic_id).await;

        Ok(self.build_receipt(
            &ledger,
            &category,
            category_limit,
            global_limit,
            config.alert_votes_left,
            false,
            vote_count,
            who_voted,
        ))
    }

    /// Move a user's vote on a closed topic into the archive.
    ///
    /// Driven by the host's topic-closure trigger, not by the vote routes.
    /// The active vote is untouched.
    pub async fn archive_vote(&self, user_id: UserId, topic_id: TopicId) -> Result<(), VoteError> {
        self.catalog.user(user_id).await?;

        let handle = self.store.ledger(user_id).await;
        handle.lock().await.archive(topic_id);
        Ok(())
    }

    /// Restore an archived vote for a reopened topic.
    pub async fn unarchive_vote(
        &self,
        user_id: UserId,
        topic_id: TopicId,
    ) -> Result<(), VoteError> {
        self.catalog.user(user_id).await?;

        let handle = self.store.ledger(user_id).await;
        handle.lock().await.unarchive(topic_id);
        Ok(())
    }

    /// Topics the user currently votes for
    pub async fn user_votes(&self, user_id: UserId) -> Result<Vec<TopicId>, VoteError> {
        self.catalog.user(user_id).await?;

        let handle = self.store.ledger(user_id).await;
        let ledger = handle.lock().await;
        Ok(ledger.active_topics())
    }

    /// Topics whose votes sit in the user's archive
    pub async fn user_archived_votes(&self, user_id: UserId) -> Result<Vec<TopicId>, VoteError> {
        self.catalog.user(user_id).await?;

        let handle = self.store.ledger(user_id).await;
        let ledger = handle.lock().await;
        Ok(ledger.archived_topics())
    }

    /// The user's vote standing within one category
    pub async fn category_vote_status(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<CategoryVoteStatus, VoteError> {
        let user = self.catalog.user(user_id).await?;
        let category = self.catalog.category(category_id).await?;
        let config = self.config.read().await.clone();

        let resolver = LimitResolver::new(config.tier_limits.clone());
        let category_limit = resolver.effective_category_limit(user.trust_tier, &category);

        let handle = self.store.ledger(user_id).await;
        let ledger = handle.lock().await;

        Ok(CategoryVoteStatus {
            has_vote_limit: category_limit.is_some(),
            votes_exceeded: category_limit
                .map(|limit| ledger.reached_category_limit(category_id, limit)),
            vote_limit: category_limit.unwrap_or_else(|| resolver.global_limit(user.trust_tier)),
        })
    }

    /// Users currently voting for a topic
    pub async fn topic_voters(&self, topic_id: TopicId) -> Result<Vec<UserId>, VoteError> {
        self.catalog.topic(topic_id).await?;
        Ok(self.store.voters_of(topic_id).await)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_receipt(
        &self,
        ledger: &UserLedger,
        category: &Category,
        category_limit: Option<u32>,
        global_limit: u32,
        alert_threshold: u32,
        user_voted: bool,
        vote_count: u64,
        who_voted: Vec<UserId>,
    ) -> VoteReceipt {
        // The limit reported back is the one that gated the request, and
        // `votes_left` subtracts the count that limit was compared against.
        let (vote_limit, counted) = match category_limit {
            Some(limit) => (limit, ledger.count(Some(category.id))),
            None => (global_limit, ledger.count(None)),
        };

        VoteReceipt {
            user_votes_exceeded: ledger.reached_global_limit(global_limit),
            user_voted,
            vote_limit,
            vote_count,
            who_voted,
            alert: ledger.alert_low_votes(global_limit, alert_threshold),
            votes_left: vote_limit.saturating_sub(counted as u32),
            category_votes_exceeded: category_limit
                .map(|limit| ledger.reached_category_limit(category.id, limit)),
        }
    }
}
