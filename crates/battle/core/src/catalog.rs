//! Ability content definitions.
//!
//! Jutsu, items, and bloodlines are static content authored in data files and
//! loaded by the content crate. They never appear in durable user rows; a
//! combatant snapshot embeds copies of the definitions it had equipped at
//! battle start.

use crate::effect::EffectTemplate;
use crate::state::{CombatSchool, PoolKind};

/// Resource cost for using an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub pool: PoolKind,
    pub amount: u32,
}

impl ResourceCost {
    pub fn chakra(amount: u32) -> Self {
        Self {
            pool: PoolKind::Chakra,
            amount,
        }
    }

    pub fn stamina(amount: u32) -> Self {
        Self {
            pool: PoolKind::Stamina,
            amount,
        }
    }
}

/// A technique a combatant can cast.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Jutsu {
    /// Stable content identifier, e.g. `"fireball"`.
    pub id: String,
    pub name: String,
    pub school: CombatSchool,
    /// Action points consumed per cast.
    pub action_points: u32,
    /// Pool cost per cast. Ninjutsu and genjutsu spend chakra, taijutsu and
    /// bukijutsu spend stamina, but content is free to deviate.
    pub cost: ResourceCost,
    /// Reach in tiles.
    pub range: u32,
    /// Seconds before the jutsu can be cast again.
    pub cooldown_seconds: i64,
    /// Effects realized against the chosen target on cast.
    pub effects: Vec<EffectTemplate>,
}

/// An equippable consumable or tool.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub action_points: u32,
    pub range: u32,
    pub cooldown_seconds: i64,
    /// Effects realized when the item is used.
    pub effects: Vec<EffectTemplate>,
    /// Effects realized once at battle start while the item is equipped.
    pub passive_effects: Vec<EffectTemplate>,
}

/// An inherited trait granting permanent passive effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bloodline {
    pub id: String,
    pub name: String,
    /// Effects realized once at battle start for the carrier.
    pub passives: Vec<EffectTemplate>,
}
