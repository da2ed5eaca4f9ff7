//! Action domain.
//!
//! An action is one discrete choice by a player or AI: attack, move, defend,
//! flee, or use an equipped ability against a target tile. Actions are values,
//! never persisted; resolving one mutates the battle aggregate and yields a
//! log entry.
//!
//! Module structure mirrors the flow:
//! - `error`: rejection reasons surfaced as notifications
//! - `profile`: resolved costs/reach/effects per action
//! - `execute`: validation and state mutation

pub mod error;
pub mod execute;
pub mod profile;

pub use error::ActionError;
pub use execute::{ActionContext, ActionOutcome, AppliedEffect, AppliedTarget, perform_battle_action};
pub use profile::{ActionProfile, profile_for};

use chrono::{DateTime, Utc};

use crate::config::BattleConfig;
use crate::state::{Combatant, Position};

/// The closed set of things a combatant can do on their turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Attack,
    Move,
    Defend,
    Flee,
    UseJutsu(String),
    UseItem(String),
}

impl ActionKind {
    /// Stable identifier used in logs and history lists.
    pub fn id(&self) -> String {
        match self {
            ActionKind::Attack => "attack".into(),
            ActionKind::Move => "move".into(),
            ActionKind::Defend => "defend".into(),
            ActionKind::Flee => "flee".into(),
            ActionKind::UseJutsu(id) => id.clone(),
            ActionKind::UseItem(id) => id.clone(),
        }
    }
}

/// One submitted choice: what to do and where.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    pub kind: ActionKind,
    /// Target tile. Required for attacks, moves, and targeted abilities.
    pub target: Option<Position>,
}

impl BattleAction {
    pub fn new(kind: ActionKind, target: Option<Position>) -> Self {
        Self { kind, target }
    }
}

/// An action a combatant could legally take right now.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvailableAction {
    pub kind: ActionKind,
    pub name: String,
    pub action_points: u32,
    pub range: u32,
}

/// All actions currently available to a combatant.
///
/// Equipped abilities are filtered by cooldown and resource cost against the
/// combatant's current pools; basic actions by action points alone.
pub fn available_actions(
    combatant: &Combatant,
    config: &BattleConfig,
    now: DateTime<Utc>,
) -> Vec<AvailableAction> {
    let mut kinds = vec![
        ActionKind::Attack,
        ActionKind::Move,
        ActionKind::Defend,
        ActionKind::Flee,
    ];
    kinds.extend(
        combatant
            .jutsus
            .iter()
            .map(|slot| ActionKind::UseJutsu(slot.jutsu.id.clone())),
    );
    kinds.extend(
        combatant
            .items
            .iter()
            .map(|slot| ActionKind::UseItem(slot.item.id.clone())),
    );

    kinds
        .into_iter()
        .filter_map(|kind| {
            let profile = profile_for(&kind, combatant, config, now).ok()?;
            if combatant.action_points < profile.action_points {
                return None;
            }
            if let Some(cost) = profile.cost
                && !combatant.pool(cost.pool).can_afford(cost.amount)
            {
                return None;
            }
            Some(AvailableAction {
                kind,
                name: profile.name,
                action_points: profile.action_points,
                range: profile.range,
            })
        })
        .collect()
}
