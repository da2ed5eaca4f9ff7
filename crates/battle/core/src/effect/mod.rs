//! Effect realization and lifecycle.
//!
//! Bloodlines, items, and jutsu all describe what they do through the same
//! declarative [`EffectTemplate`]. Casting realizes a template into a concrete
//! [`UserEffect`] or [`GroundEffect`] instance with power scaled by the
//! caster's level and lifecycle metadata attached. The closed [`EffectKind`]
//! union is matched exhaustively everywhere an effect is applied; an unknown
//! kind cannot exist at runtime.
//!
//! Instant kinds (direct damage, heals, cleanses) mutate pools at cast time
//! and are never stored. Durational kinds live in the battle's effect lists
//! until their round counter runs out, ticking once per round rollover in
//! [`rounds::apply_round_effects`].

pub mod rounds;

pub use rounds::apply_round_effects;

use crate::state::{CombatSchool, Position, UserId};

// ============================================================================
// Effect Kinds
// ============================================================================

/// Which stat column a buff or debuff adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatAxis {
    Offence,
    Defence,
}

/// Closed set of effect behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Immediate damage to the target's health, after barrier absorption.
    Damage,

    /// Health damage ticking once per round.
    DamageOverTime,

    /// Immediate health restoration.
    Heal,

    /// Health restoration ticking once per round.
    HealOverTime,

    /// Raises one stat column of one school while active.
    StatBuff {
        school: CombatSchool,
        axis: StatAxis,
    },

    /// Lowers one stat column of one school while active.
    StatDebuff {
        school: CombatSchool,
        axis: StatAxis,
    },

    /// Absorbs incoming damage until its power is consumed.
    Barrier,

    /// The target cannot act; their turns are consumed by a forced skip.
    Stun,

    /// Strips all hostile durational effects from the target.
    Clear,
}

impl EffectKind {
    /// Instant kinds resolve entirely at cast time and are never stored in
    /// the battle's effect lists.
    pub fn is_instant(&self) -> bool {
        matches!(self, EffectKind::Damage | EffectKind::Heal | EffectKind::Clear)
    }

    /// Whether the effect works against its target rather than for it.
    pub fn is_hostile(&self) -> bool {
        matches!(
            self,
            EffectKind::Damage
                | EffectKind::DamageOverTime
                | EffectKind::StatDebuff { .. }
                | EffectKind::Stun
        )
    }

    /// Short label used in battle log descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Damage => "damage",
            EffectKind::DamageOverTime => "lingering damage",
            EffectKind::Heal => "healing",
            EffectKind::HealOverTime => "regeneration",
            EffectKind::StatBuff { .. } => "empowerment",
            EffectKind::StatDebuff { .. } => "weakening",
            EffectKind::Barrier => "barrier",
            EffectKind::Stun => "stun",
            EffectKind::Clear => "cleanse",
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

/// How a realized instance derives its power from the template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Calculation {
    /// Power is the template's base power regardless of caster level.
    Static,
    /// Power grows linearly with caster level.
    #[default]
    Formula,
}

/// Who a template applies to when its ability resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateTarget {
    /// The combatant using the ability.
    Caster,
    /// The combatant standing on the chosen tile.
    Opponent,
    /// The chosen tile itself.
    Ground,
}

/// Declarative effect description attached to bloodlines, items, and jutsu.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub target: TemplateTarget,
    pub base_power: i32,
    /// Added to power per caster level under [`Calculation::Formula`].
    /// Non-negative, so realized power is monotonic in level.
    pub power_per_level: i32,
    /// Rounds the realized instance persists; `None` lasts the whole battle.
    /// Ignored by instant kinds.
    pub rounds: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub calculation: Calculation,
}

impl EffectTemplate {
    /// Power the template realizes at a given caster level.
    pub fn power_at(&self, level: u32) -> i32 {
        match self.calculation {
            Calculation::Static => self.base_power,
            Calculation::Formula => {
                self.base_power + self.power_per_level.saturating_mul(level as i32)
            }
        }
    }
}

// ============================================================================
// Realized Instances
// ============================================================================

/// A realized effect bound to a combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserEffect {
    pub kind: EffectKind,
    pub creator: UserId,
    pub target: UserId,
    /// Working power; barriers spend this down as they absorb.
    pub power: i32,
    /// Power at realization time, kept for display and recomputation.
    pub base_power: i32,
    /// Remaining rounds; `None` lasts until the battle ends.
    pub rounds: Option<u32>,
    pub created_round: u32,
    pub calculation: Calculation,
    /// Just applied during the current resolution and not yet rendered.
    pub is_new: bool,
    /// Applied during the current round; skips the next rollover tick so a
    /// shared, not-yet-resolved effect cannot fire twice in one pass.
    pub cast_this_round: bool,
}

/// A realized effect bound to a grid tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundEffect {
    pub kind: EffectKind,
    pub creator: UserId,
    pub position: Position,
    pub power: i32,
    pub base_power: i32,
    pub rounds: Option<u32>,
    pub created_round: u32,
    pub calculation: Calculation,
    pub is_new: bool,
    pub cast_this_round: bool,
}

/// Realizes a template against a combatant.
///
/// Deterministic and side-effect free: the caller decides whether to apply
/// the instance immediately or append it to the battle's effect list.
pub fn realize(
    template: &EffectTemplate,
    creator: UserId,
    target: UserId,
    level: u32,
    round: u32,
    is_new: bool,
) -> UserEffect {
    let power = template.power_at(level);
    UserEffect {
        kind: template.kind,
        creator,
        target,
        power,
        base_power: power,
        rounds: template.rounds,
        created_round: round,
        calculation: template.calculation,
        is_new,
        cast_this_round: false,
    }
}

/// Realizes a template against a grid tile.
pub fn realize_ground(
    template: &EffectTemplate,
    creator: UserId,
    position: Position,
    level: u32,
    round: u32,
    is_new: bool,
) -> GroundEffect {
    let power = template.power_at(level);
    GroundEffect {
        kind: template.kind,
        creator,
        position,
        power,
        base_power: power,
        rounds: template.rounds,
        created_round: round,
        calculation: template.calculation,
        is_new,
        cast_this_round: false,
    }
}

// ============================================================================
// Stat Queries
// ============================================================================

/// Net offence adjustment on `user` from active buffs and debuffs.
///
/// `school = None` counts every school, which is what the basic attack's
/// highest-stat scaling wants.
pub fn offence_bonus(effects: &[UserEffect], user: UserId, school: Option<CombatSchool>) -> i32 {
    stat_bonus(effects, user, school, StatAxis::Offence)
}

/// Net defence adjustment on `user` from active buffs and debuffs.
pub fn defence_bonus(effects: &[UserEffect], user: UserId, school: Option<CombatSchool>) -> i32 {
    stat_bonus(effects, user, school, StatAxis::Defence)
}

fn stat_bonus(
    effects: &[UserEffect],
    user: UserId,
    school: Option<CombatSchool>,
    axis: StatAxis,
) -> i32 {
    effects
        .iter()
        .filter(|effect| effect.target == user)
        .map(|effect| match effect.kind {
            EffectKind::StatBuff {
                school: effect_school,
                axis: effect_axis,
            } if effect_axis == axis && school.is_none_or(|s| s == effect_school) => effect.power,
            EffectKind::StatDebuff {
                school: effect_school,
                axis: effect_axis,
            } if effect_axis == axis && school.is_none_or(|s| s == effect_school) => -effect.power,
            _ => 0,
        })
        .sum()
}

/// Routes `amount` of incoming damage through the target's barriers.
///
/// Barriers absorb in creation order, spending their `power` down. Consumed
/// barriers are removed. Returns `(absorbed, remaining)`.
pub fn absorb_damage(effects: &mut Vec<UserEffect>, target: UserId, amount: u32) -> (u32, u32) {
    let mut remaining = amount as i32;
    let mut absorbed = 0;

    for effect in effects.iter_mut() {
        if remaining == 0 {
            break;
        }
        if effect.target != target || !matches!(effect.kind, EffectKind::Barrier) {
            continue;
        }
        let soaked = effect.power.min(remaining);
        effect.power -= soaked;
        remaining -= soaked;
        absorbed += soaked;
    }

    effects.retain(|effect| !(matches!(effect.kind, EffectKind::Barrier) && effect.power <= 0));

    (absorbed as u32, remaining as u32)
}
