//! Topic Eligibility
//!
//! Decides whether a topic may receive votes at all, independent of any
//! user's remaining quota.

use super::config::VotingConfig;
use super::model::{Category, Topic, TopicSubtype};

/// Stateless votability check for topics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityGuard;

impl EligibilityGuard {
    pub fn new() -> Self {
        Self
    }

    /// A topic is votable when voting is globally enabled, its category
    /// accepts votes (or the subtype is votable everywhere), and the topic
    /// is not the category's own discussion thread.
    pub fn can_vote(&self, config: &VotingConfig, topic: &Topic, category: &Category) -> bool {
        if !config.enabled {
            return false;
        }

        let subtype_votable = matches!(
            topic.subtype,
            Some(TopicSubtype::Petition | TopicSubtype::Content)
        );
        if !(category.votes_allowed || subtype_votable) {
            return false;
        }

        category.discussion_topic_id != Some(topic.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_votable_topic() {
        let guard = EligibilityGuard::new();
        let topic = Topic::new(10, 1);
        let category = Category::new(1);

        assert!(guard.can_vote(&VotingConfig::default(), &topic, &category));
    }

    #[test]
    fn test_kill_switch_blocks_everything() {
        let guard = EligibilityGuard::new();
        let topic = Topic::new(10, 1).with_subtype(TopicSubtype::Petition);
        let category = Category::new(1);

        assert!(!guard.can_vote(&VotingConfig::disabled(), &topic, &category));
    }

    #[test]
    fn test_category_opt_out() {
        let guard = EligibilityGuard::new();
        let topic = Topic::new(10, 1);
        let mut category = Category::new(1);
        category.votes_allowed = false;

        assert!(!guard.can_vote(&VotingConfig::default(), &topic, &category));
    }

    #[test]
    fn test_petition_votable_in_opted_out_category() {
        let guard = EligibilityGuard::new();
        let topic = Topic::new(10, 1).with_subtype(TopicSubtype::Petition);
        let mut category = Category::new(1);
        category.votes_allowed = false;

        assert!(guard.can_vote(&VotingConfig::default(), &topic, &category));
    }

    #[test]
    fn test_content_votable_in_opted_out_category() {
        let guard = EligibilityGuard::new();
        let topic = Topic::new(10, 1).with_subtype(TopicSubtype::Content);
        let mut category = Category::new(1);
        category.votes_allowed = false;

        assert!(guard.can_vote(&VotingConfig::default(), &topic, &category));
    }

    #[test]
    fn test_category_discussion_topic_is_never_votable() {
        let guard = EligibilityGuard::new();
        let topic = Topic::new(10, 1).with_subtype(TopicSubtype::Petition);
        let mut category = Category::new(1);
        category.discussion_topic_id = Some(10);

        assert!(!guard.can_vote(&VotingConfig::default(), &topic, &category));

        // Other topics in the same category are unaffected.
        let other = Topic::new(11, 1);
        assert!(guard.can_vote(&VotingConfig::default(), &other, &category));
    }
}
