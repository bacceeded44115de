//! Domain types for the voting core.
//!
//! Users, topics, and categories are owned by the host platform; the types
//! here carry the slice of each entity the vote ledger needs.

use serde::{Deserialize, Serialize};

/// User identifier.
pub type UserId = u64;

/// Topic identifier.
pub type TopicId = u64;

/// Category identifier.
pub type CategoryId = u64;

/// A user as seen by the voting core.
///
/// The trust tier is assigned externally and read-only here; vote state
/// lives in the ledger, not on the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Trust tier 0-4. Values above 4 use the tier-4 limit tables.
    #[serde(default)]
    pub trust_tier: u8,
}

impl User {
    pub fn new(id: UserId, trust_tier: u8) -> Self {
        Self { id, trust_tier }
    }
}

/// Topic subtypes that are votable regardless of category settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicSubtype {
    Petition,
    Content,
}

/// A votable topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,

    /// The category the topic belongs to. A topic belongs to exactly one
    /// category.
    pub category_id: CategoryId,

    #[serde(default)]
    pub subtype: Option<TopicSubtype>,

    /// Cached number of users currently voting for this topic.
    #[serde(default)]
    pub vote_count: u64,
}

impl Topic {
    pub fn new(id: TopicId, category_id: CategoryId) -> Self {
        Self {
            id,
            category_id,
            subtype: None,
            vote_count: 0,
        }
    }

    pub fn with_subtype(mut self, subtype: TopicSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }
}

/// Optional per-tier vote limits. `None` means no override for that tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierOverrides {
    pub tl0: Option<u32>,
    pub tl1: Option<u32>,
    pub tl2: Option<u32>,
    pub tl3: Option<u32>,
    pub tl4: Option<u32>,
}

impl TierOverrides {
    /// Override for the given tier, if one is set. Tiers above 4 use the
    /// tier-4 slot.
    pub fn for_tier(&self, tier: u8) -> Option<u32> {
        match tier {
            0 => self.tl0,
            1 => self.tl1,
            2 => self.tl2,
            3 => self.tl3,
            _ => self.tl4,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tl0.is_none()
            && self.tl1.is_none()
            && self.tl2.is_none()
            && self.tl3.is_none()
            && self.tl4.is_none()
    }
}

/// A category as seen by the voting core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Whether topics in this category accept votes at all.
    #[serde(default)]
    pub votes_allowed: bool,

    /// The category's own discussion topic, which can never be voted on.
    #[serde(default)]
    pub discussion_topic_id: Option<TopicId>,

    /// Per-tier overrides of the site-wide vote limit.
    #[serde(default)]
    pub tier_overrides: TierOverrides,

    /// When set, a tier override is capped by the user's site-wide limit.
    #[serde(default)]
    pub apply_site_limits: bool,
}

impl Category {
    pub fn new(id: CategoryId) -> Self {
        Self {
            id,
            votes_allowed: true,
            discussion_topic_id: None,
            tier_overrides: TierOverrides::default(),
            apply_site_limits: false,
        }
    }
}
