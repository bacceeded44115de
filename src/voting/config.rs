//! Voting Configuration
//!
//! Site-wide settings for the vote ledger: the global kill switch, the
//! per-tier vote limits, and the low-votes alert threshold. Threaded
//! explicitly into the limit resolver and the vote service rather than read
//! from ambient global state.

use serde::{Deserialize, Serialize};

/// Default site-wide vote limits per trust tier
pub const DEFAULT_TL0_VOTE_LIMIT: u32 = 2;
pub const DEFAULT_TL1_VOTE_LIMIT: u32 = 4;
pub const DEFAULT_TL2_VOTE_LIMIT: u32 = 6;
pub const DEFAULT_TL3_VOTE_LIMIT: u32 = 8;
pub const DEFAULT_TL4_VOTE_LIMIT: u32 = 10;

/// Default number of remaining votes at which the user is alerted
pub const DEFAULT_ALERT_VOTES_LEFT: u32 = 2;

/// Site-wide vote limits per trust tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierLimits {
    pub tl0: u32,
    pub tl1: u32,
    pub tl2: u32,
    pub tl3: u32,
    pub tl4: u32,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            tl0: DEFAULT_TL0_VOTE_LIMIT,
            tl1: DEFAULT_TL1_VOTE_LIMIT,
            tl2: DEFAULT_TL2_VOTE_LIMIT,
            tl3: DEFAULT_TL3_VOTE_LIMIT,
            tl4: DEFAULT_TL4_VOTE_LIMIT,
        }
    }
}

impl TierLimits {
    /// The limit for the given tier. Tiers above 4 use the tier-4 limit.
    pub fn for_tier(&self, tier: u8) -> u32 {
        match tier {
            0 => self.tl0,
            1 => self.tl1,
            2 => self.tl2,
            3 => self.tl3,
            _ => self.tl4,
        }
    }
}

/// Voting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingConfig {
    /// Global kill switch: when false, no topic accepts votes.
    pub enabled: bool,

    /// Site-wide per-tier vote limits.
    pub tier_limits: TierLimits,

    /// Alert the user when this many votes (or fewer) remain.
    pub alert_votes_left: u32,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tier_limits: TierLimits::default(),
            alert_votes_left: DEFAULT_ALERT_VOTES_LEFT,
        }
    }
}

impl VotingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable voting (for testing the kill switch)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Apply environment variable overrides to the configuration
    ///
    /// Environment variables take precedence over config file values:
    /// - VOTEGATE_VOTING_ENABLED
    /// - VOTEGATE_ALERT_VOTES_LEFT
    /// - VOTEGATE_TL0_VOTE_LIMIT .. VOTEGATE_TL4_VOTE_LIMIT
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("VOTEGATE_VOTING_ENABLED") {
            self.enabled = val.parse().unwrap_or(self.enabled);
        }

        if let Ok(val) = std::env::var("VOTEGATE_ALERT_VOTES_LEFT") {
            if let Ok(threshold) = val.parse() {
                self.alert_votes_left = threshold;
            }
        }

        let tier_slots = [
            ("VOTEGATE_TL0_VOTE_LIMIT", &mut self.tier_limits.tl0),
            ("VOTEGATE_TL1_VOTE_LIMIT", &mut self.tier_limits.tl1),
            ("VOTEGATE_TL2_VOTE_LIMIT", &mut self.tier_limits.tl2),
            ("VOTEGATE_TL3_VOTE_LIMIT", &mut self.tier_limits.tl3),
            ("VOTEGATE_TL4_VOTE_LIMIT", &mut self.tier_limits.tl4),
        ];
        for (var, slot) in tier_slots {
            if let Ok(val) = std::env::var(var) {
                if let Ok(limit) = val.parse() {
                    *slot = limit;
                }
            }
        }

        self
    }
}
