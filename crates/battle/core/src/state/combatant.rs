//! Combatant snapshots.
//!
//! A combatant is a point-in-time copy of a participant's stats, equipment,
//! and history, owned exclusively by its battle. Durable user rows are not
//! referenced while the battle runs; the runtime folds the snapshot back into
//! them once the battle is terminal.

use chrono::{DateTime, Utc};

use crate::catalog::{Item, Jutsu};
use crate::state::meter::ResourceMeter;
use crate::state::types::{CombatSchool, General, Generals, Position, SchoolStats, UserId};

/// An equipped jutsu with its cooldown clock.
///
/// `last_used` is purely a cooldown timestamp. At battle start it is rewound
/// so cooldown remaining from before the battle carries over.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JutsuSlot {
    pub jutsu: Jutsu,
    pub last_used: DateTime<Utc>,
}

impl JutsuSlot {
    pub fn new(jutsu: Jutsu, last_used: DateTime<Utc>) -> Self {
        Self { jutsu, last_used }
    }

    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        (now - self.last_used).num_seconds() >= self.jutsu.cooldown_seconds
    }
}

/// An equipped item with remaining quantity and its cooldown clock.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSlot {
    pub item: Item,
    pub quantity: u32,
    pub last_used: DateTime<Utc>,
}

impl ItemSlot {
    pub fn new(item: Item, quantity: u32, last_used: DateTime<Utc>) -> Self {
        Self {
            item,
            quantity,
            last_used,
        }
    }

    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        self.quantity > 0 && (now - self.last_used).num_seconds() >= self.item.cooldown_seconds
    }
}

/// Battle-scoped snapshot of one participant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub user_id: UserId,
    pub username: String,
    pub level: u32,

    // === Resource pools, clamped 0..=max ===
    pub health: ResourceMeter,
    pub chakra: ResourceMeter,
    pub stamina: ResourceMeter,

    // === Stat blocks across the four combat schools ===
    pub offence: SchoolStats,
    pub defence: SchoolStats,
    pub generals: Generals,

    /// Highest offence stat, frozen at battle start.
    pub highest_offence: i32,
    /// Highest defence stat, frozen at battle start.
    pub highest_defence: i32,

    /// Tile the combatant stands on. Always within grid bounds.
    pub position: Position,

    /// Who submits this combatant's turns. Equals `user_id` for humans and
    /// for AIs acting on their own behalf.
    pub controller: UserId,
    pub is_ai: bool,
    /// False for summons and clones added mid-battle.
    pub is_original: bool,
    pub fled_battle: bool,
    pub left_battle: bool,

    /// Per-turn budget, refilled when the combatant's round begins.
    pub action_points: u32,

    // === Append-only history, consumed by reward computation ===
    pub used_generals: Vec<General>,
    pub used_stats: Vec<CombatSchool>,
    pub used_actions: Vec<String>,

    // === Equipped content, copied in at battle start ===
    pub jutsus: Vec<JutsuSlot>,
    pub items: Vec<ItemSlot>,
    pub bloodline_id: Option<String>,

    /// Last round in which this combatant consumed a turn. Round completion
    /// is `acted_round == battle.round` for every live combatant.
    pub acted_round: u32,
    pub updated_at: DateTime<Utc>,
}

impl Combatant {
    /// Health has reached zero.
    pub fn is_defeated(&self) -> bool {
        self.health.is_empty()
    }

    /// No longer participating: downed, fled, or left.
    pub fn is_gone(&self) -> bool {
        self.is_defeated() || self.fled_battle || self.left_battle
    }

    /// Derives and freezes the highest offence/defence stats. Called once at
    /// initiation; the values are intentionally not recomputed afterwards.
    pub fn freeze_highest_stats(&mut self) {
        self.highest_offence = self.offence.highest();
        self.highest_defence = self.defence.highest();
    }

    pub fn pool(&self, kind: crate::state::PoolKind) -> &ResourceMeter {
        match kind {
            crate::state::PoolKind::Health => &self.health,
            crate::state::PoolKind::Chakra => &self.chakra,
            crate::state::PoolKind::Stamina => &self.stamina,
        }
    }

    pub fn pool_mut(&mut self, kind: crate::state::PoolKind) -> &mut ResourceMeter {
        match kind {
            crate::state::PoolKind::Health => &mut self.health,
            crate::state::PoolKind::Chakra => &mut self.chakra,
            crate::state::PoolKind::Stamina => &mut self.stamina,
        }
    }

    pub fn jutsu_slot(&self, id: &str) -> Option<&JutsuSlot> {
        self.jutsus.iter().find(|slot| slot.jutsu.id == id)
    }

    pub fn item_slot(&self, id: &str) -> Option<&ItemSlot> {
        self.items.iter().find(|slot| slot.item.id == id)
    }
}
