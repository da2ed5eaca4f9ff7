//! Per-round effect stack processing.
//!
//! Runs exactly once at every round rollover: tiles fire on whoever stands on
//! them, damage- and heal-over-time instances tick, durations decrement, and
//! expired instances drop out. Effects flagged `cast_this_round` were already
//! applied during the round being closed, so they skip this pass once and
//! start ticking from the next rollover.

use crate::effect::{EffectKind, absorb_damage};
use crate::state::{Battle, UserId};

/// Applies the effect stack for a completed round.
///
/// Returns human-readable lines describing everything that fired, for the
/// battle log.
pub fn apply_round_effects(battle: &mut Battle) -> Vec<String> {
    let mut log = Vec::new();

    tick_ground_effects(battle, &mut log);
    tick_user_effects(battle, &mut log);
    expire(battle);

    log
}

fn tick_ground_effects(battle: &mut Battle, log: &mut Vec<String>) {
    // Collect (victim, kind, power) pairs first; applying while iterating
    // would alias the combatant list.
    let firing: Vec<(UserId, EffectKind, i32)> = battle
        .ground_effects
        .iter()
        .filter(|effect| !effect.cast_this_round)
        .filter_map(|effect| {
            battle
                .combatant_at(effect.position)
                .map(|victim| (victim.user_id, effect.kind, effect.power))
        })
        .collect();

    for (victim, kind, power) in firing {
        apply_tick(battle, victim, kind, power, log);
    }
}

fn tick_user_effects(battle: &mut Battle, log: &mut Vec<String>) {
    let firing: Vec<(UserId, EffectKind, i32)> = battle
        .user_effects
        .iter()
        .filter(|effect| !effect.cast_this_round)
        .map(|effect| (effect.target, effect.kind, effect.power))
        .collect();

    for (target, kind, power) in firing {
        apply_tick(battle, target, kind, power, log);
    }
}

fn apply_tick(battle: &mut Battle, target: UserId, kind: EffectKind, power: i32, log: &mut Vec<String>) {
    let amount = power.max(0) as u32;
    match kind {
        EffectKind::DamageOverTime => {
            if battle.combatant(target).is_none_or(|c| c.is_gone()) {
                return;
            }
            let (absorbed, through) = absorb_damage(&mut battle.user_effects, target, amount);
            let Some(victim) = battle.combatant_mut(target) else {
                return;
            };
            let dealt = victim.health.damage(through);
            if absorbed > 0 {
                log.push(format!("{}'s barrier absorbs {absorbed} damage", victim.username));
            }
            if dealt > 0 {
                log.push(format!("{} suffers {dealt} lingering damage", victim.username));
            }
            if victim.is_defeated() {
                log.push(format!("{} collapses", victim.username));
            }
        }
        EffectKind::HealOverTime => {
            let Some(target_state) = battle.combatant_mut(target) else {
                return;
            };
            if target_state.is_gone() {
                return;
            }
            let healed = target_state.health.restore(amount);
            if healed > 0 {
                log.push(format!("{} regenerates {healed} health", target_state.username));
            }
        }
        // Presence-based kinds do their work through stat queries and the
        // scheduler; nothing fires at the rollover.
        EffectKind::StatBuff { .. }
        | EffectKind::StatDebuff { .. }
        | EffectKind::Barrier
        | EffectKind::Stun => {}
        // Instant kinds are never stored, so they cannot reach a rollover.
        EffectKind::Damage | EffectKind::Heal | EffectKind::Clear => {}
    }
}

/// Decrements durations and drops expired instances. Effects cast during the
/// closing round keep their full duration and merely lose the flag.
fn expire(battle: &mut Battle) {
    for effect in &mut battle.user_effects {
        if effect.cast_this_round {
            effect.cast_this_round = false;
        } else if let Some(rounds) = &mut effect.rounds {
            *rounds = rounds.saturating_sub(1);
        }
        effect.is_new = false;
    }
    for effect in &mut battle.ground_effects {
        if effect.cast_this_round {
            effect.cast_this_round = false;
        } else if let Some(rounds) = &mut effect.rounds {
            *rounds = rounds.saturating_sub(1);
        }
        effect.is_new = false;
    }

    battle
        .user_effects
        .retain(|effect| effect.rounds.is_none_or(|r| r > 0));
    battle
        .ground_effects
        .retain(|effect| effect.rounds.is_none_or(|r| r > 0));
}
