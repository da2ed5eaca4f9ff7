//! Action profiles.
//!
//! A profile is the resolved specification of one action for one combatant:
//! what it costs, how far it reaches, and which effect templates it applies.
//! Basic actions derive their profiles from [`BattleConfig`]; jutsu and item
//! actions pull theirs from the combatant's equipped slots, which also carry
//! the cooldown clocks.

use chrono::{DateTime, Utc};

use crate::action::error::ActionError;
use crate::action::ActionKind;
use crate::catalog::ResourceCost;
use crate::config::BattleConfig;
use crate::effect::EffectTemplate;
use crate::state::{Combatant, CombatSchool};

/// Resolved costs, reach, and effects for one action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionProfile {
    /// Content id recorded in the actor's action history.
    pub id: String,
    /// Display name used in battle log descriptions.
    pub name: String,
    pub action_points: u32,
    pub cost: Option<ResourceCost>,
    pub range: u32,
    /// Combat school driving damage scaling; `None` for school-less actions,
    /// which scale off the frozen highest stats instead.
    pub school: Option<CombatSchool>,
    pub effects: Vec<EffectTemplate>,
}

/// Resolves the profile for an action, enforcing that the backing ability is
/// equipped and off cooldown. Resource affordability is checked by the
/// execution pipeline, not here.
pub fn profile_for(
    kind: &ActionKind,
    combatant: &Combatant,
    config: &BattleConfig,
    now: DateTime<Utc>,
) -> Result<ActionProfile, ActionError> {
    match kind {
        ActionKind::Attack => Ok(ActionProfile {
            id: "attack".into(),
            name: "Attack".into(),
            action_points: config.attack_action_points,
            cost: Some(ResourceCost::stamina(config.attack_stamina)),
            range: config.attack_range,
            school: None,
            effects: Vec::new(),
        }),
        ActionKind::Move => Ok(ActionProfile {
            id: "move".into(),
            name: "Move".into(),
            action_points: config.move_action_points,
            cost: None,
            range: 1,
            school: None,
            effects: Vec::new(),
        }),
        ActionKind::Defend => Ok(ActionProfile {
            id: "defend".into(),
            name: "Defend".into(),
            action_points: config.defend_action_points,
            cost: None,
            range: 0,
            school: None,
            effects: Vec::new(),
        }),
        ActionKind::Flee => Ok(ActionProfile {
            id: "flee".into(),
            name: "Flee".into(),
            action_points: config.flee_action_points,
            cost: None,
            range: 0,
            school: None,
            effects: Vec::new(),
        }),
        ActionKind::UseJutsu(id) => {
            let slot = combatant
                .jutsu_slot(id)
                .ok_or(ActionError::ActionNotAvailable)?;
            if !slot.is_ready(now) {
                return Err(ActionError::OnCooldown);
            }
            Ok(ActionProfile {
                id: slot.jutsu.id.clone(),
                name: slot.jutsu.name.clone(),
                action_points: slot.jutsu.action_points,
                cost: Some(slot.jutsu.cost),
                range: slot.jutsu.range,
                school: Some(slot.jutsu.school),
                effects: slot.jutsu.effects.clone(),
            })
        }
        ActionKind::UseItem(id) => {
            let slot = combatant
                .item_slot(id)
                .ok_or(ActionError::ActionNotAvailable)?;
            if !slot.is_ready(now) {
                return Err(ActionError::OnCooldown);
            }
            Ok(ActionProfile {
                id: slot.item.id.clone(),
                name: slot.item.name.clone(),
                action_points: slot.item.action_points,
                cost: None,
                range: slot.item.range,
                school: None,
                effects: slot.item.effects.clone(),
            })
        }
    }
}
