//! Durable user rows.
//!
//! The battle engine treats the user store as an external collaborator: it
//! reads a regeneration-adjusted snapshot at initiation and folds combatant
//! deltas back in once a battle is terminal. Nothing else touches these rows
//! while the `Battle` status flag is set.

use battle_core::{
    BattleId, CombatantTemplate, Generals, Position, ResourceMeter, SchoolStats, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Lifecycle state of a user row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum UserStatus {
    Awake,
    Battle,
    Hospitalized,
    Asleep,
    Traveling,
}

/// One durable user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub level: u32,
    pub status: UserStatus,

    pub health: ResourceMeter,
    pub chakra: ResourceMeter,
    pub stamina: ResourceMeter,
    /// Pool points recovered per minute while resting.
    pub regen_per_minute: u32,

    pub offence: SchoolStats,
    pub defence: SchoolStats,
    pub generals: Generals,

    pub experience: f64,
    pub money: i64,

    /// World-map sector the user stands in.
    pub sector: u32,
    /// World-map tile within the sector, reused for attack adjacency checks.
    pub location: Position,

    /// Window during which the user cannot be attacked.
    pub immune_until: Option<DateTime<Utc>>,
    /// The battle this user is locked into, if any.
    pub battle_id: Option<BattleId>,

    pub jutsu_ids: Vec<String>,
    pub item_ids: Vec<String>,
    pub bloodline_id: Option<String>,

    /// Last time regeneration was applied.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh awake user with level-scaled stats, standing at a world tile.
    pub fn new(id: UserId, username: impl Into<String>, level: u32, now: DateTime<Utc>) -> Self {
        let template = CombatantTemplate::new("", level);
        Self {
            id,
            username: username.into(),
            level,
            status: UserStatus::Awake,
            health: ResourceMeter::full(template.health),
            chakra: ResourceMeter::full(template.chakra),
            stamina: ResourceMeter::full(template.stamina),
            regen_per_minute: 5 + level,
            offence: template.offence,
            defence: template.defence,
            generals: template.generals,
            experience: 0.0,
            money: 100,
            sector: 1,
            location: Position::new(0, 0),
            immune_until: None,
            battle_id: None,
            jutsu_ids: Vec::new(),
            item_ids: Vec::new(),
            bloodline_id: None,
            updated_at: now,
        }
    }

    /// Applies time-based pool regeneration up to `now`.
    ///
    /// Linear in elapsed minutes, clamped by each pool's maximum. Users in a
    /// battle do not regenerate; their pools belong to the battle snapshot.
    pub fn regenerate(&mut self, now: DateTime<Utc>) {
        if self.status == UserStatus::Battle {
            return;
        }
        let minutes = (now - self.updated_at).num_minutes().max(0) as u32;
        if minutes == 0 {
            return;
        }
        let amount = self.regen_per_minute.saturating_mul(minutes);
        self.health.restore(amount);
        self.chakra.restore(amount);
        self.stamina.restore(amount);
        self.updated_at = now;
    }

    /// Whether the user is inside their attack-immunity window.
    pub fn is_immune(&self, now: DateTime<Utc>) -> bool {
        self.immune_until.is_some_and(|until| until > now)
    }

    /// The combatant template this row snapshots into at battle start.
    pub fn to_template(&self) -> CombatantTemplate {
        CombatantTemplate {
            name: self.username.clone(),
            level: self.level,
            health: self.health.max(),
            chakra: self.chakra.max(),
            stamina: self.stamina.max(),
            offence: self.offence,
            defence: self.defence,
            generals: self.generals,
            jutsu_ids: self.jutsu_ids.clone(),
            item_ids: self.item_ids.clone(),
            bloodline_id: self.bloodline_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn regeneration_is_linear_and_clamped() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut user = UserProfile::new(UserId(1), "Shira", 5, at);
        let max = user.health.max();
        user.health.damage(50);
        user.chakra.damage(10);

        user.regenerate(at + Duration::minutes(2));
        assert_eq!(user.health.current(), max - 50 + 2 * user.regen_per_minute);
        assert_eq!(user.chakra.current(), user.chakra.max());
    }

    #[test]
    fn no_regeneration_while_in_battle() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut user = UserProfile::new(UserId(1), "Shira", 5, at);
        user.health.damage(50);
        user.status = UserStatus::Battle;
        let before = user.health.current();

        user.regenerate(at + Duration::minutes(30));
        assert_eq!(user.health.current(), before);
    }

    #[test]
    fn immunity_window() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut user = UserProfile::new(UserId(1), "Shira", 5, at);
        assert!(!user.is_immune(at));
        user.immune_until = Some(at + Duration::seconds(300));
        assert!(user.is_immune(at + Duration::seconds(299)));
        assert!(!user.is_immune(at + Duration::seconds(301)));
    }
}
