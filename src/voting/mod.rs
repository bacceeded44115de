//! Vote Ledger and Limit Engine
//!
//! This module tracks which topics each user votes for, enforces per-tier
//! vote quotas, and applies per-category quota overrides that can
//! optionally be capped by the site-wide limit.
//!
//! # Features
//!
//! - Per-user ledgers of active and archived votes, partitioned by category
//! - Pure effective-limit resolution over the configured tier tables
//! - Eligibility checks independent of any user's remaining quota
//! - Request orchestration with per-user atomic check-and-mutate
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Vote Service                          │
//! ├──────────────┬──────────────────┬───────────────────────────┤
//! │ Eligibility  │  Limit Resolver  │  Notifier (vote events)   │
//! │ Guard        │  (tier tables)   │                           │
//! ├──────────────┴──────────────────┴───────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │   Ledger Store (per-user ledgers + voter index)     │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod events;
pub mod ledger;
pub mod limits;
pub mod model;
#[cfg(test)]
mod proptests;
pub mod service;
pub mod store;

pub use catalog::Catalog;
pub use config::{TierLimits, VotingConfig};
pub use eligibility::EligibilityGuard;
pub use error::VoteError;
pub use events::{LogNotifier, Notifier, VoteEvent, VoteEventKind};
pub use ledger::UserLedger;
pub use limits::LimitResolver;
pub use model::{Category, CategoryId, TierOverrides, Topic, TopicId, TopicSubtype, User, UserId};
pub use service::{CategoryVoteStatus, VoteReceipt, VoteService};
pub use store::LedgerStore;
