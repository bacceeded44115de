//! Per-User Vote Ledger
//!
//! Tracks the set of topics a user actively votes for, the same set
//! partitioned by category, and the archived set for topics that were
//! closed. The ledger owns the membership invariants; callers serialize
//! mutations per user through the ledger store.

use std::collections::{HashMap, HashSet};

use super::model::{CategoryId, TopicId};

/// One user's vote record.
///
/// Invariant: every topic in a per-category set is also in `active`, and
/// every active topic appears in exactly one per-category set. `archived`
/// is independent of `active`; archiving is a separate lifecycle step.
#[derive(Debug, Clone, Default)]
pub struct UserLedger {
    active: HashSet<TopicId>,
    by_category: HashMap<CategoryId, HashSet<TopicId>>,
    archived: HashSet<TopicId>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active votes, overall or within one category.
    pub fn count(&self, category: Option<CategoryId>) -> usize {
        match category {
            Some(id) => self.by_category.get(&id).map_or(0, HashSet::len),
            None => self.active.len(),
        }
    }

    /// Whether the user currently votes for the topic.
    pub fn is_active(&self, topic: TopicId) -> bool {
        self.active.contains(&topic)
    }

    /// Whether the topic sits in the user's archive.
    pub fn is_archived(&self, topic: TopicId) -> bool {
        self.archived.contains(&topic)
    }

    /// Record a vote. Returns `false` without mutating anything when the
    /// topic is already voted for; a duplicate add must never inflate any
    /// count.
    pub fn add(&mut self, topic: TopicId, category: CategoryId) -> bool {
        if !self.active.insert(topic) {
            return false;
        }
        self.by_category.entry(category).or_default().insert(topic);
        true
    }

    /// Drop a vote. Returns `false` when the topic was not voted for;
    /// removing an absent vote is a no-op, not an error.
    pub fn remove(&mut self, topic: TopicId, category: CategoryId) -> bool {
        if !self.active.remove(&topic) {
            return false;
        }
        if let Some(set) = self.by_category.get_mut(&category) {
            set.remove(&topic);
            if set.is_empty() {
                self.by_category.remove(&category);
            }
        }
        true
    }

    /// Move a topic into the archive. Active votes are untouched; the
    /// transition is driven by topic closure, not by vote removal.
    pub fn archive(&mut self, topic: TopicId) {
        self.archived.insert(topic);
    }

    /// Take a topic back out of the archive.
    pub fn unarchive(&mut self, topic: TopicId) {
        self.archived.remove(&topic);
    }

    pub fn reached_global_limit(&self, limit: u32) -> bool {
        self.count(None) >= limit as usize
    }

    pub fn reached_category_limit(&self, category: CategoryId, limit: u32) -> bool {
        self.count(Some(category)) >= limit as usize
    }

    /// Whether the user is close enough to the limit to be alerted.
    pub fn alert_low_votes(&self, limit: u32, threshold: u32) -> bool {
        limit.saturating_sub(self.count(None) as u32) <= threshold
    }

    /// Topics the user currently votes for, in stable order.
    pub fn active_topics(&self) -> Vec<TopicId> {
        let mut topics: Vec<TopicId> = self.active.iter().copied().collect();
        topics.sort_unstable();
        topics
    }

    /// Topics the user votes for within one category, in stable order.
    pub fn category_topics(&self, category: CategoryId) -> Vec<TopicId> {
        let mut topics: Vec<TopicId> = self
            .by_category
            .get(&category)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        topics.sort_unstable();
        topics
    }

    /// Categories the user currently has votes in.
    pub fn voted_categories(&self) -> Vec<CategoryId> {
        let mut categories: Vec<CategoryId> = self.by_category.keys().copied().collect();
        categories.sort_unstable();
        categories
    }

    /// Archived topics, in stable order.
    pub fn archived_topics(&self) -> Vec<TopicId> {
        let mut topics: Vec<TopicId> = self.archived.iter().copied().collect();
        topics.sort_unstable();
        topics
    }
}
