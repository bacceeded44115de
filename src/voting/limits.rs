//! Effective Vote Limit Computation
//!
//! Pure lookups over the configured tier tables: the site-wide per-tier
//! limit, and per-category overrides that may be capped by the site-wide
//! limit. No state, no side effects.

use super::config::TierLimits;
use super::model::Category;

/// Resolves the vote limit that applies to a user in a given context.
#[derive(Debug, Clone)]
pub struct LimitResolver {
    tiers: TierLimits,
}

impl LimitResolver {
    pub fn new(tiers: TierLimits) -> Self {
        Self { tiers }
    }

    /// The site-wide limit for a trust tier.
    pub fn global_limit(&self, tier: u8) -> u32 {
        self.tiers.for_tier(tier)
    }

    /// The category's raw override for a tier, if one is configured.
    pub fn category_override(&self, tier: u8, category: &Category) -> Option<u32> {
        category.tier_overrides.for_tier(tier)
    }

    /// The limit a category imposes on a tier, or `None` when the category
    /// has no override for that tier. With `apply_site_limits` the override
    /// cannot exceed the site-wide limit.
    pub fn effective_category_limit(&self, tier: u8, category: &Category) -> Option<u32> {
        let override_limit = self.category_override(tier, category)?;

        Some(if category.apply_site_limits {
            override_limit.min(self.global_limit(tier))
        } else {
            override_limit
        })
    }

    /// The limit that applies to a user of `tier` in `category` context:
    /// the category limit when an override exists, the site-wide limit
    /// otherwise (or when no category is involved).
    pub fn effective_limit(&self, tier: u8, category: Option<&Category>) -> u32 {
        category
            .and_then(|c| self.effective_category_limit(tier, c))
            .unwrap_or_else(|| self.global_limit(tier))
    }
}
