//! Property-Based Tests for the Vote Ledger
//!
//! Uses proptest to verify the ledger and limit invariants hold for random
//! inputs.
//!
//! # Test Strategies
//!
//! - **Limit arithmetic**: capped category overrides never exceed the
//!   site-wide limit, uncapped overrides stand alone
//! - **Ledger membership**: the per-category sets always partition the
//!   active set, under arbitrary add/remove/archive sequences
//!
//! # Running the Tests
//!
//! ```bash
//! cargo test --lib voting::proptests
//! ```

use proptest::prelude::*;

use super::config::TierLimits;
use super::ledger::UserLedger;
use super::limits::LimitResolver;
use super::model::{Category, CategoryId, TierOverrides, TopicId};

// Helper: generate arbitrary tier tables
fn arb_tier_limits() -> impl Strategy<Value = TierLimits> {
    (0u32..50, 0u32..50, 0u32..50, 0u32..50, 0u32..50).prop_map(|(tl0, tl1, tl2, tl3, tl4)| {
        TierLimits {
            tl0,
            tl1,
            tl2,
            tl3,
            tl4,
        }
    })
}

// Helper: generate a category with an override for every tier
fn arb_overridden_category(apply_site_limits: bool) -> impl Strategy<Value = Category> {
    (1u64..100, 0u32..50).prop_map(move |(id, limit)| {
        let mut category = Category::new(id);
        category.tier_overrides = TierOverrides {
            tl0: Some(limit),
            tl1: Some(limit),
            tl2: Some(limit),
            tl3: Some(limit),
            tl4: Some(limit),
        };
        category.apply_site_limits = apply_site_limits;
        category
    })
}

// Helper: one step against a ledger
#[derive(Debug, Clone)]
enum LedgerOp {
    Add(TopicId, CategoryId),
    Remove(TopicId, CategoryId),
    Archive(TopicId),
    Unarchive(TopicId),
}

fn arb_ledger_ops() -> impl Strategy<Value = Vec<LedgerOp>> {
    // Topics carry a fixed category (topic % 3) so add/remove pairs agree,
    // mirroring topics belonging to exactly one category.
    prop::collection::vec((0u8..4, 0u64..20), 0..60).prop_map(|steps| {
        steps
            .into_iter()
            .map(|(op, topic)| {
                let category = topic % 3;
                match op {
                    0 => LedgerOp::Add(topic, category),
                    1 => LedgerOp::Remove(topic, category),
                    2 => LedgerOp::Archive(topic),
                    _ => LedgerOp::Unarchive(topic),
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_capped_override_never_exceeds_global(
        limits in arb_tier_limits(),
        category in arb_overridden_category(true),
        tier in 0u8..5,
    ) {
        let resolver = LimitResolver::new(limits);
        let effective = resolver.effective_category_limit(tier, &category).unwrap();
        prop_assert!(effective <= resolver.global_limit(tier));
    }

    #[test]
    fn prop_uncapped_override_stands_alone(
        limits in arb_tier_limits(),
        category in arb_overridden_category(false),
        tier in 0u8..5,
    ) {
        let resolver = LimitResolver::new(limits);
        let effective = resolver.effective_category_limit(tier, &category).unwrap();
        prop_assert_eq!(Some(effective), category.tier_overrides.for_tier(tier));
    }

    #[test]
    fn prop_effective_limit_without_override_is_global(
        limits in arb_tier_limits(),
        tier in 0u8..5,
    ) {
        let resolver = LimitResolver::new(limits);
        let category = Category::new(1);
        prop_assert_eq!(
            resolver.effective_limit(tier, Some(&category)),
            resolver.global_limit(tier)
        );
    }

    #[test]
    fn prop_category_sets_partition_active(ops in arb_ledger_ops()) {
        let mut ledger = UserLedger::new();
        for op in ops {
            match op {
                LedgerOp::Add(topic, category) => { ledger.add(topic, category); }
                LedgerOp::Remove(topic, category) => { ledger.remove(topic, category); }
                LedgerOp::Archive(topic) => ledger.archive(topic),
                LedgerOp::Unarchive(topic) => ledger.unarchive(topic),
            }
        }

        // Per-category sets must partition the active set exactly.
        let mut partitioned = 0;
        for category in ledger.voted_categories() {
            for topic in ledger.category_topics(category) {
                prop_assert!(ledger.is_active(topic));
                partitioned += 1;
            }
        }
        prop_assert_eq!(partitioned, ledger.count(None));
    }

    #[test]
    fn prop_remaining_votes_never_underflow(
        limit in 0u32..20,
        adds in 0usize..30,
    ) {
        let mut ledger = UserLedger::new();
        for topic in 0..adds {
            if !ledger.reached_global_limit(limit) {
                ledger.add(topic as TopicId, 0);
            }
        }

        // Gated adds can never push the count past the limit.
        prop_assert!(ledger.count(None) <= limit as usize);
        prop_assert!(limit.saturating_sub(ledger.count(None) as u32) <= limit);
    }
}
