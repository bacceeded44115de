//! Entity Catalog
//!
//! Registry of the users, topics, and categories the vote service operates
//! on. Stands in for the host platform that owns these entities; typed
//! lookups replace the loosely-typed per-entity attribute bags a host
//! would attach values to.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::VoteError;
use super::model::{Category, CategoryId, Topic, TopicId, User, UserId};

/// In-memory entity registry
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    topics: Arc<RwLock<HashMap<TopicId, Topic>>>,
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn upsert_topic(&self, topic: Topic) {
        self.topics.write().await.insert(topic.id, topic);
    }

    pub async fn upsert_category(&self, category: Category) {
        self.categories.write().await.insert(category.id, category);
    }

    pub async fn user(&self, id: UserId) -> Result<User, VoteError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(VoteError::UserNotFound(id))
    }

    pub async fn topic(&self, id: TopicId) -> Result<Topic, VoteError> {
        self.topics
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(VoteError::TopicNotFound(id))
    }

    pub async fn category(&self, id: CategoryId) -> Result<Category, VoteError> {
        self.categories
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(VoteError::CategoryNotFound(id))
    }

    /// Update a topic's cached vote count. Unknown topics are ignored; the
    /// count is recomputed on the next vote anyway.
    pub async fn set_vote_count(&self, id: TopicId, count: u64) {
        if let Some(topic) = self.topics.write().await.get_mut(&id) {
            topic.vote_count = count;
        }
    }

    /// Number of registered topics
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}
