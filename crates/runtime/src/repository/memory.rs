//! In-memory store implementation for tests and local runs.
//!
//! One `RwLock` guards all tables, so the composite operations
//! (`insert_battle`, `settle_battle`) are atomic exactly like the
//! multi-statement transactions a durable store would run.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use battle_core::{Battle, BattleId, UserId};
use chrono::{DateTime, Utc};

use crate::repository::{
    BattleEntry, BattleRepository, EntryRepository, HistoryRepository, HistoryRow,
    RepositoryError, Result, UserRepository,
};
use crate::user::UserProfile;

#[derive(Default)]
struct StoreInner {
    battles: HashMap<BattleId, Battle>,
    users: HashMap<UserId, UserProfile>,
    history: Vec<HistoryRow>,
    entries: HashMap<BattleId, Vec<BattleEntry>>,
}

/// All repository traits backed by one process-local store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user row, replacing any previous row with the same id.
    pub fn seed_user(&self, user: UserProfile) {
        if let Ok(mut inner) = self.inner.write() {
            inner.users.insert(user.id, user);
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| RepositoryError::LockPoisoned)
    }
}

#[async_trait]
impl BattleRepository for MemoryStore {
    async fn insert_battle(
        &self,
        battle: Battle,
        users: Vec<UserProfile>,
        history: Option<HistoryRow>,
    ) -> Result<()> {
        let mut inner = self.write()?;
        for user in users {
            inner.users.insert(user.id, user);
        }
        if let Some(row) = history {
            inner.history.push(row);
        }
        inner.battles.insert(battle.id, battle);
        Ok(())
    }

    async fn fetch_battle(&self, id: BattleId) -> Result<Option<Battle>> {
        Ok(self.read()?.battles.get(&id).cloned())
    }

    async fn commit_battle(&self, expected_version: u64, mut battle: Battle) -> Result<u64> {
        let mut inner = self.write()?;
        let stored = inner
            .battles
            .get(&battle.id)
            .ok_or(RepositoryError::BattleNotFound)?;
        if stored.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                stored: stored.version,
            });
        }
        let new_version = expected_version + 1;
        battle.version = new_version;
        inner.battles.insert(battle.id, battle);
        Ok(new_version)
    }

    async fn settle_battle(
        &self,
        expected_version: u64,
        battle: &Battle,
        users: Vec<UserProfile>,
    ) -> Result<()> {
        let mut inner = self.write()?;
        let stored = inner
            .battles
            .get(&battle.id)
            .ok_or(RepositoryError::BattleNotFound)?;
        if stored.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                stored: stored.version,
            });
        }
        inner.battles.remove(&battle.id);
        for user in users {
            inner.users.insert(user.id, user);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn fetch_user(&self, id: UserId) -> Result<Option<UserProfile>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn fetch_regenerated_user(
        &self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<UserProfile>> {
        Ok(self.read()?.users.get(&id).cloned().map(|mut user| {
            user.regenerate(now);
            user
        }))
    }

    async fn update_user(&self, user: UserProfile) -> Result<()> {
        let mut inner = self.write()?;
        if !inner.users.contains_key(&user.id) {
            return Err(RepositoryError::UserNotFound);
        }
        inner.users.insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for MemoryStore {
    async fn append_history(&self, row: HistoryRow) -> Result<()> {
        self.write()?.history.push(row);
        Ok(())
    }

    async fn count_encounters(
        &self,
        a: UserId,
        b: UserId,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u32> {
        Ok(self
            .read()?
            .history
            .iter()
            .filter(|row| {
                (row.attacker == a && row.defender == b
                    || row.attacker == b && row.defender == a)
                    && row.created_at >= since
                    && row.created_at < until
            })
            .count() as u32)
    }
}

#[async_trait]
impl EntryRepository for MemoryStore {
    async fn append_entries(&self, entries: Vec<BattleEntry>) -> Result<()> {
        let mut inner = self.write()?;
        for entry in entries {
            inner.entries.entry(entry.battle_id).or_default().push(entry);
        }
        Ok(())
    }

    async fn recent_entries(&self, battle: BattleId, limit: usize) -> Result<Vec<BattleEntry>> {
        Ok(self
            .read()?
            .entries
            .get(&battle)
            .map(|entries| entries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::BattleType;
    use chrono::TimeZone;

    fn empty_battle(id: u64, at: DateTime<Utc>) -> Battle {
        Battle {
            id: BattleId(id),
            battle_type: BattleType::Sparring,
            version: 1,
            combatants: Vec::new(),
            user_effects: Vec::new(),
            ground_effects: Vec::new(),
            active_user: UserId(1),
            round: 1,
            created_at: at,
            updated_at: at,
            round_start_at: at,
        }
    }

    #[tokio::test]
    async fn commit_enforces_version_cas() {
        let store = MemoryStore::new();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let battle = empty_battle(1, at);
        store
            .insert_battle(battle.clone(), Vec::new(), None)
            .await
            .unwrap();

        let v2 = store.commit_battle(1, battle.clone()).await.unwrap();
        assert_eq!(v2, 2);

        // Same expected version again: stale.
        let err = store.commit_battle(1, battle.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::VersionConflict { expected: 1, stored: 2 }
        ));

        let stored = store.fetch_battle(BattleId(1)).await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn encounter_window_counts_both_directions() {
        let store = MemoryStore::new();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        for (attacker, defender, minutes) in [(1, 2, 0), (2, 1, 10), (1, 3, 20)] {
            store
                .append_history(HistoryRow {
                    attacker: UserId(attacker),
                    defender: UserId(defender),
                    created_at: at + chrono::Duration::minutes(minutes),
                })
                .await
                .unwrap();
        }

        let count = store
            .count_encounters(
                UserId(1),
                UserId(2),
                at - chrono::Duration::minutes(60),
                at + chrono::Duration::minutes(60),
            )
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn recent_entries_newest_first_capped() {
        let store = MemoryStore::new();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let entries: Vec<BattleEntry> = (0..40)
            .map(|i| BattleEntry {
                battle_id: BattleId(1),
                round: i,
                description: format!("entry {i}"),
                applied: Vec::new(),
                created_at: at + chrono::Duration::seconds(i as i64),
            })
            .collect();
        store.append_entries(entries).await.unwrap();

        let recent = store.recent_entries(BattleId(1), 30).await.unwrap();
        assert_eq!(recent.len(), 30);
        assert_eq!(recent[0].round, 39);
        assert_eq!(recent[29].round, 10);
    }
}
