//! Store contracts for battle persistence.
//!
//! The durable store is an external collaborator reached only through these
//! traits: transactional multi-row writes, a version-guarded battle commit,
//! and plain row access. Every battle mutation flows through
//! [`BattleRepository::commit_battle`] or [`BattleRepository::settle_battle`],
//! both of which reject stale versions so concurrent requests serialize on
//! the battle row.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use battle_core::{AppliedEffect, Battle, BattleId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("battle version conflict: expected {expected}, stored {stored}")]
    VersionConflict { expected: u64, stored: u64 },

    #[error("battle not found")]
    BattleNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Encounter ledger row. Outlives the battle it was written for; only the
/// trailing-window count between two users is ever read back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub attacker: UserId,
    pub defender: UserId,
    pub created_at: DateTime<Utc>,
}

/// One line of a battle's action log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleEntry {
    pub battle_id: BattleId,
    pub round: u32,
    pub description: String,
    pub applied: Vec<AppliedEffect>,
    pub created_at: DateTime<Utc>,
}

/// Battle row persistence with optimistic concurrency.
#[async_trait]
pub trait BattleRepository: Send + Sync {
    /// Inserts a new battle plus its side effects in one transaction: the
    /// updated user rows (status flipped to `Battle`) and the optional
    /// encounter ledger row. Nothing is written if any part fails.
    async fn insert_battle(
        &self,
        battle: Battle,
        users: Vec<UserProfile>,
        history: Option<HistoryRow>,
    ) -> Result<()>;

    /// Loads the current battle row.
    async fn fetch_battle(&self, id: BattleId) -> Result<Option<Battle>>;

    /// Conditionally replaces the battle row.
    ///
    /// Succeeds only while the stored version still equals
    /// `expected_version`; the stored row then receives `expected_version +
    /// 1`. Returns the new version. A concurrent writer winning the race
    /// surfaces as [`RepositoryError::VersionConflict`].
    async fn commit_battle(&self, expected_version: u64, battle: Battle) -> Result<u64>;

    /// Terminal commit: version-guarded like [`Self::commit_battle`], but
    /// deletes the battle row and folds the given user rows back into the
    /// durable store in the same transaction.
    async fn settle_battle(
        &self,
        expected_version: u64,
        battle: &Battle,
        users: Vec<UserProfile>,
    ) -> Result<()>;
}

/// User row access.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn fetch_user(&self, id: UserId) -> Result<Option<UserProfile>>;

    /// Loads a user with time-based pool regeneration applied up to `now`.
    async fn fetch_regenerated_user(
        &self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<UserProfile>>;

    async fn update_user(&self, user: UserProfile) -> Result<()>;
}

/// Encounter ledger.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn append_history(&self, row: HistoryRow) -> Result<()>;

    /// Rows pairing `a` and `b` (either direction) created inside
    /// `[since, until)`.
    async fn count_encounters(
        &self,
        a: UserId,
        b: UserId,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u32>;
}

/// Battle action log.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn append_entries(&self, entries: Vec<BattleEntry>) -> Result<()>;

    /// Most recent entries for a battle, newest first, capped at `limit`.
    async fn recent_entries(&self, battle: BattleId, limit: usize) -> Result<Vec<BattleEntry>>;
}
