//! Authoritative battle state representation.
//!
//! The [`Battle`] aggregate owns everything a fight needs: combatant
//! snapshots, active effects, ground effects, and turn bookkeeping. The
//! runtime clones or queries this state but mutates it exclusively through
//! the action and engine modules, then commits the whole aggregate under a
//! version compare-and-swap.

mod combatant;
mod meter;
mod types;

pub use combatant::{Combatant, ItemSlot, JutsuSlot};
pub use meter::ResourceMeter;
pub use types::{
    BattleId, BattleType, CombatSchool, General, Generals, PoolKind, Position, SchoolStats, UserId,
};

use chrono::{DateTime, Utc};

use crate::effect::{EffectKind, GroundEffect, UserEffect};

/// One active combat encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    pub id: BattleId,
    pub battle_type: BattleType,

    /// Optimistic-concurrency counter. Strictly increases on every committed
    /// mutation; a commit carrying a stale version is rejected by the store.
    pub version: u64,

    /// Ordered participant snapshots. The battle owns these copies; durable
    /// user rows are untouched until the battle is terminal.
    pub combatants: Vec<Combatant>,

    /// Active effects bound to combatants.
    pub user_effects: Vec<UserEffect>,

    /// Active effects bound to grid tiles.
    pub ground_effects: Vec<GroundEffect>,

    /// Whose turn it currently is.
    pub active_user: UserId,

    /// Current round counter. A round ends once every live combatant has
    /// consumed a turn.
    pub round: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub round_start_at: DateTime<Utc>,
}

impl Battle {
    pub fn combatant(&self, user: UserId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.user_id == user)
    }

    pub fn combatant_mut(&mut self, user: UserId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.user_id == user)
    }

    /// Combatants still participating in the fight.
    pub fn live_combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| !c.is_gone())
    }

    /// The combatant standing on a tile, if any.
    pub fn combatant_at(&self, position: Position) -> Option<&Combatant> {
        self.combatants
            .iter()
            .find(|c| !c.is_gone() && c.position == position)
    }

    /// Whether a tile is occupied by a live combatant.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.combatant_at(position).is_some()
    }

    /// Active effects bound to one combatant.
    pub fn effects_on(&self, user: UserId) -> impl Iterator<Item = &UserEffect> {
        self.user_effects.iter().filter(move |e| e.target == user)
    }

    /// Whether a combatant currently carries a stun.
    pub fn is_stunned(&self, user: UserId) -> bool {
        self.user_effects
            .iter()
            .any(|e| e.target == user && matches!(e.kind, EffectKind::Stun))
    }

    /// Whether every live combatant has consumed a turn this round.
    pub fn round_is_complete(&self) -> bool {
        self.live_combatants().all(|c| c.acted_round == self.round)
    }

    /// Live combatants not controlled by `viewer`.
    pub fn opponents_of(&self, viewer: UserId) -> impl Iterator<Item = &Combatant> {
        self.live_combatants().filter(move |c| c.controller != viewer)
    }
}
