//! Combatant templates.
//!
//! Templates describe a participant before a battle exists: arena opponents
//! authored in content files, and user rows converted by the runtime at
//! initiation. [`CombatantTemplate::to_combatant`] produces the snapshot the
//! battle aggregate owns.

use chrono::{DateTime, Utc};

use crate::state::{Combatant, Generals, Position, ResourceMeter, SchoolStats, UserId};

/// Stat block and loadout for a combatant-to-be.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub chakra: u32,
    pub stamina: u32,
    pub offence: SchoolStats,
    pub defence: SchoolStats,
    pub generals: Generals,
    /// Content ids resolved against the jutsu catalog when the battle is
    /// assembled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub jutsu_ids: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_ids: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bloodline_id: Option<String>,
}

impl CombatantTemplate {
    /// A plain template with stats scaled linearly from level. Arena content
    /// overrides individual fields; tests use it as-is.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        let l = level as i32;
        Self {
            name: name.into(),
            level,
            health: 100 + 20 * level,
            chakra: 50 + 10 * level,
            stamina: 50 + 10 * level,
            offence: SchoolStats::new(12 + 2 * l, 8 + l, 10 + 2 * l, 8 + l),
            defence: SchoolStats::new(10 + 2 * l, 8 + l, 10 + l, 8 + l),
            generals: Generals::new(10 + l, 10 + l, 10 + l, 10 + l),
            jutsu_ids: Vec::new(),
            item_ids: Vec::new(),
            bloodline_id: None,
        }
    }

    /// Builds the battle-owned snapshot. Equipment slots are attached by the
    /// caller once content ids are resolved.
    pub fn to_combatant(
        &self,
        user_id: UserId,
        controller: UserId,
        position: Position,
        is_ai: bool,
        now: DateTime<Utc>,
    ) -> Combatant {
        let mut combatant = Combatant {
            user_id,
            username: self.name.clone(),
            level: self.level,
            health: ResourceMeter::full(self.health),
            chakra: ResourceMeter::full(self.chakra),
            stamina: ResourceMeter::full(self.stamina),
            offence: self.offence,
            defence: self.defence,
            generals: self.generals,
            highest_offence: 0,
            highest_defence: 0,
            position,
            controller,
            is_ai,
            is_original: true,
            fled_battle: false,
            left_battle: false,
            action_points: 0,
            used_generals: Vec::new(),
            used_stats: Vec::new(),
            used_actions: Vec::new(),
            jutsus: Vec::new(),
            items: Vec::new(),
            bloodline_id: self.bloodline_id.clone(),
            acted_round: 0,
            updated_at: now,
        };
        combatant.freeze_highest_stats();
        combatant
    }
}
