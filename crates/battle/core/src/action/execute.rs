//! Action execution.
//!
//! Resolution runs in two strict phases. Validation inspects the battle
//! without touching it and rejects anything illegal; only once every check
//! has passed does the apply phase mutate the aggregate. A returned error
//! therefore guarantees the battle is byte-for-byte unchanged.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::action::error::ActionError;
use crate::action::profile::{ActionProfile, profile_for};
use crate::action::{ActionKind, BattleAction};
use crate::config::BattleConfig;
use crate::effect::{
    Calculation, EffectKind, EffectTemplate, StatAxis, TemplateTarget, absorb_damage,
    defence_bonus, offence_bonus, realize, realize_ground,
};
use crate::grid::BattleGrid;
use crate::state::{Battle, CombatSchool, Position, UserId};

/// Ambient inputs shared by every resolution in one request.
#[derive(Clone, Copy, Debug)]
pub struct ActionContext<'a> {
    pub grid: &'a BattleGrid,
    pub config: &'a BattleConfig,
    /// The requesting user; must control the acting combatant.
    pub context_user: UserId,
    pub now: DateTime<Utc>,
}

/// Where a realized or instant effect landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedTarget {
    User(UserId),
    Ground(Position),
}

/// One concrete consequence of a resolved action, for the structured log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub kind: EffectKind,
    pub target: AppliedTarget,
    /// Damage dealt, health restored, barrier strength, or effect power.
    pub value: i32,
}

/// Result of a successfully resolved action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub description: String,
    pub applied: Vec<AppliedEffect>,
}

/// Validates and applies one action for `actor`.
///
/// On `Err` the battle is unchanged and the error message is safe to show to
/// the requester. Randomness is confined to flee resolution.
pub fn perform_battle_action(
    battle: &mut Battle,
    ctx: &ActionContext<'_>,
    actor: UserId,
    action: &BattleAction,
    rng: &mut impl Rng,
) -> Result<ActionOutcome, ActionError> {
    // ------------------------------------------------------------------
    // Validation phase: read-only.
    // ------------------------------------------------------------------
    let combatant = battle.combatant(actor).ok_or(ActionError::UnknownCombatant)?;
    if combatant.is_gone() {
        return Err(ActionError::CombatantGone);
    }
    if battle.active_user != actor || combatant.controller != ctx.context_user {
        return Err(ActionError::NotYourTurn);
    }
    if battle.is_stunned(actor) {
        return Err(ActionError::Stunned);
    }

    let profile = profile_for(&action.kind, combatant, ctx.config, ctx.now)?;
    if combatant.action_points < profile.action_points {
        return Err(ActionError::OutOfActionPoints);
    }
    if let Some(cost) = profile.cost
        && !combatant.pool(cost.pool).can_afford(cost.amount)
    {
        return Err(ActionError::InsufficientResources(cost.pool));
    }

    let origin = combatant.position;
    validate_target(battle, ctx, actor, action, &profile, origin)?;

    // ------------------------------------------------------------------
    // Apply phase: validation passed, nothing below can fail.
    // ------------------------------------------------------------------
    let round = battle.round;
    let level = combatant.level;
    let actor_name = combatant.username.clone();

    pay_costs(battle, actor, &profile, ctx.now);

    let mut applied = Vec::new();
    let mut parts = Vec::new();

    match &action.kind {
        ActionKind::Attack => {
            // Target presence was validated; `expect`-free lookup.
            if let Some(victim) = action.target.and_then(|t| battle.combatant_at(t)) {
                let victim_id = victim.user_id;
                let victim_name = victim.username.clone();
                let raw = attack_damage(battle, actor, victim_id, None, 0);
                let dealt = deal_damage(battle, victim_id, raw, &mut applied, &mut parts);
                parts.insert(0, format!("{actor_name} attacks {victim_name} for {dealt} damage"));
                note_defeat(battle, victim_id, &mut parts);
            }
        }
        ActionKind::Move => {
            if let Some(target) = action.target {
                if let Some(mover) = battle.combatant_mut(actor) {
                    mover.position = target;
                }
                parts.push(format!("{actor_name} moves to {target}"));
            }
        }
        ActionKind::Defend => {
            let school = battle
                .combatant(actor)
                .map(|c| c.defence.highest_school())
                .unwrap_or(CombatSchool::Taijutsu);
            let template = EffectTemplate {
                kind: EffectKind::StatBuff {
                    school,
                    axis: StatAxis::Defence,
                },
                target: TemplateTarget::Caster,
                base_power: ctx.config.defend_power,
                power_per_level: 0,
                rounds: Some(1),
                calculation: Calculation::Static,
            };
            store_effect(battle, &template, actor, level, None, round, &mut applied);
            parts.push(format!("{actor_name} takes a defensive stance"));
        }
        ActionKind::Flee => {
            let speed = battle
                .combatant(actor)
                .map(|c| c.generals.speed)
                .unwrap_or(0);
            let chance = (ctx.config.flee_chance + speed as f64 * 0.002).clamp(0.05, 0.95);
            if rng.gen_bool(chance) {
                if let Some(runner) = battle.combatant_mut(actor) {
                    runner.fled_battle = true;
                }
                parts.push(format!("{actor_name} flees the battle"));
            } else {
                parts.push(format!("{actor_name} tries to flee but fails"));
            }
        }
        ActionKind::UseJutsu(_) | ActionKind::UseItem(_) => {
            parts.push(format!("{actor_name} uses {}", profile.name));
            for template in &profile.effects {
                apply_template(
                    battle,
                    template,
                    actor,
                    level,
                    profile.school,
                    action.target,
                    round,
                    &mut applied,
                    &mut parts,
                );
            }
        }
    }

    record_history(battle, actor, &profile, &action.kind);

    if let Some(acted) = battle.combatant_mut(actor) {
        acted.acted_round = round;
        acted.updated_at = ctx.now;
    }
    battle.updated_at = ctx.now;

    Ok(ActionOutcome {
        description: parts.join(", "),
        applied,
    })
}

// ============================================================================
// Validation helpers
// ============================================================================

fn validate_target(
    battle: &Battle,
    ctx: &ActionContext<'_>,
    actor: UserId,
    action: &BattleAction,
    profile: &ActionProfile,
    origin: Position,
) -> Result<(), ActionError> {
    match &action.kind {
        ActionKind::Move => {
            let target = action.target.ok_or(ActionError::MissingTarget)?;
            if !ctx.grid.contains(target) {
                return Err(ActionError::OutOfBounds);
            }
            let distance = ctx.grid.movement_cost(origin, target);
            if distance == 0 || distance > profile.range {
                return Err(ActionError::OutOfRange);
            }
            if battle.is_occupied(target) {
                return Err(ActionError::TileOccupied);
            }
            Ok(())
        }
        ActionKind::Attack => {
            let target = action.target.ok_or(ActionError::MissingTarget)?;
            if !ctx.grid.contains(target) {
                return Err(ActionError::OutOfBounds);
            }
            if ctx.grid.distance(origin, target) > profile.range {
                return Err(ActionError::OutOfRange);
            }
            let victim = battle
                .combatant_at(target)
                .ok_or(ActionError::NoTargetAtTile)?;
            if victim.user_id == actor {
                return Err(ActionError::InvalidTarget);
            }
            Ok(())
        }
        ActionKind::UseJutsu(_) | ActionKind::UseItem(_) => {
            let needs_tile = profile
                .effects
                .iter()
                .any(|t| matches!(t.target, TemplateTarget::Opponent | TemplateTarget::Ground));
            if !needs_tile {
                return Ok(());
            }
            let target = action.target.ok_or(ActionError::MissingTarget)?;
            if !ctx.grid.contains(target) {
                return Err(ActionError::OutOfBounds);
            }
            if ctx.grid.distance(origin, target) > profile.range {
                return Err(ActionError::OutOfRange);
            }
            let needs_occupant = profile
                .effects
                .iter()
                .any(|t| matches!(t.target, TemplateTarget::Opponent));
            if needs_occupant && battle.combatant_at(target).is_none() {
                return Err(ActionError::NoTargetAtTile);
            }
            Ok(())
        }
        ActionKind::Defend | ActionKind::Flee => Ok(()),
    }
}

// ============================================================================
// Apply helpers
// ============================================================================

fn pay_costs(battle: &mut Battle, actor: UserId, profile: &ActionProfile, now: DateTime<Utc>) {
    let Some(combatant) = battle.combatant_mut(actor) else {
        return;
    };
    combatant.action_points = combatant.action_points.saturating_sub(profile.action_points);
    if let Some(cost) = profile.cost {
        combatant.pool_mut(cost.pool).spend(cost.amount);
    }
    // Advance the cooldown clock on the backing slot, if any.
    if let Some(slot) = combatant
        .jutsus
        .iter_mut()
        .find(|slot| slot.jutsu.id == profile.id)
    {
        slot.last_used = now;
    } else if let Some(slot) = combatant
        .items
        .iter_mut()
        .find(|slot| slot.item.id == profile.id)
    {
        slot.last_used = now;
        slot.quantity = slot.quantity.saturating_sub(1);
    }
}

fn record_history(battle: &mut Battle, actor: UserId, profile: &ActionProfile, kind: &ActionKind) {
    let school = match kind {
        ActionKind::Attack => battle.combatant(actor).map(|c| c.offence.highest_school()),
        _ => profile.school,
    };
    let Some(combatant) = battle.combatant_mut(actor) else {
        return;
    };
    combatant.used_actions.push(profile.id.clone());
    if let Some(school) = school {
        combatant.used_stats.push(school);
        combatant.used_generals.push(school.general());
    }
}

/// Damage of an offensive strike before barrier absorption.
///
/// School-less strikes scale off the frozen highest stats; schooled ones off
/// the matching stat column. Buffs and debuffs adjust both sides. Never
/// below 1: a landed hit always costs something.
fn attack_damage(
    battle: &Battle,
    attacker: UserId,
    victim: UserId,
    school: Option<CombatSchool>,
    power: i32,
) -> u32 {
    let (offence, defence) = match (battle.combatant(attacker), battle.combatant(victim)) {
        (Some(atk), Some(def)) => {
            let offence = match school {
                Some(s) => atk.offence.get(s) + offence_bonus(&battle.user_effects, attacker, Some(s)),
                None => atk.highest_offence + offence_bonus(&battle.user_effects, attacker, None),
            };
            let defence = match school {
                Some(s) => def.defence.get(s) + defence_bonus(&battle.user_effects, victim, Some(s)),
                None => def.highest_defence + defence_bonus(&battle.user_effects, victim, None),
            };
            (offence, defence)
        }
        _ => (0, 0),
    };
    (power + offence - defence).max(1) as u32
}

/// Routes damage through barriers, applies the remainder to health, and
/// records both in the structured log. Returns health damage dealt.
fn deal_damage(
    battle: &mut Battle,
    victim: UserId,
    amount: u32,
    applied: &mut Vec<AppliedEffect>,
    parts: &mut Vec<String>,
) -> u32 {
    let (absorbed, through) = absorb_damage(&mut battle.user_effects, victim, amount);
    if absorbed > 0 {
        applied.push(AppliedEffect {
            kind: EffectKind::Barrier,
            target: AppliedTarget::User(victim),
            value: -(absorbed as i32),
        });
        parts.push(format!("a barrier absorbs {absorbed} damage"));
    }
    let Some(target) = battle.combatant_mut(victim) else {
        return 0;
    };
    let dealt = target.health.damage(through);
    applied.push(AppliedEffect {
        kind: EffectKind::Damage,
        target: AppliedTarget::User(victim),
        value: dealt as i32,
    });
    dealt
}

/// Appends a collapse line when the victim just went down.
fn note_defeat(battle: &Battle, victim: UserId, parts: &mut Vec<String>) {
    if let Some(target) = battle.combatant(victim)
        && target.is_defeated()
    {
        parts.push(format!("{} collapses", target.username));
    }
}

/// Realizes a durational template into the battle's effect lists.
fn store_effect(
    battle: &mut Battle,
    template: &EffectTemplate,
    creator: UserId,
    level: u32,
    tile: Option<Position>,
    round: u32,
    applied: &mut Vec<AppliedEffect>,
) {
    match template.target {
        TemplateTarget::Ground => {
            let Some(position) = tile else {
                return;
            };
            let mut effect = realize_ground(template, creator, position, level, round, true);
            effect.cast_this_round = true;
            applied.push(AppliedEffect {
                kind: effect.kind,
                target: AppliedTarget::Ground(position),
                value: effect.power,
            });
            battle.ground_effects.push(effect);
        }
        TemplateTarget::Caster | TemplateTarget::Opponent => {
            let target = match template.target {
                TemplateTarget::Caster => Some(creator),
                _ => tile.and_then(|t| battle.combatant_at(t)).map(|c| c.user_id),
            };
            let Some(target) = target else {
                return;
            };
            let mut effect = realize(template, creator, target, level, round, true);
            effect.cast_this_round = true;
            applied.push(AppliedEffect {
                kind: effect.kind,
                target: AppliedTarget::User(target),
                value: effect.power,
            });
            battle.user_effects.push(effect);
        }
    }
}

/// Applies one template of an ability: instant kinds resolve immediately,
/// durational kinds are stored for the round passes.
#[allow(clippy::too_many_arguments)]
fn apply_template(
    battle: &mut Battle,
    template: &EffectTemplate,
    creator: UserId,
    level: u32,
    school: Option<CombatSchool>,
    tile: Option<Position>,
    round: u32,
    applied: &mut Vec<AppliedEffect>,
    parts: &mut Vec<String>,
) {
    let subject = match template.target {
        TemplateTarget::Caster => Some(creator),
        TemplateTarget::Opponent => tile.and_then(|t| battle.combatant_at(t)).map(|c| c.user_id),
        TemplateTarget::Ground => None,
    };

    match template.kind {
        EffectKind::Damage => {
            let Some(victim) = subject else { return };
            let raw = attack_damage(battle, creator, victim, school, template.power_at(level));
            let victim_name = battle
                .combatant(victim)
                .map(|c| c.username.clone())
                .unwrap_or_default();
            let dealt = deal_damage(battle, victim, raw, applied, parts);
            parts.push(format!("dealing {dealt} damage to {victim_name}"));
            note_defeat(battle, victim, parts);
        }
        EffectKind::Heal => {
            let Some(target) = subject else { return };
            let amount = template.power_at(level).max(0) as u32;
            if let Some(combatant) = battle.combatant_mut(target) {
                let healed = combatant.health.restore(amount);
                applied.push(AppliedEffect {
                    kind: EffectKind::Heal,
                    target: AppliedTarget::User(target),
                    value: healed as i32,
                });
                parts.push(format!("restoring {healed} health to {}", combatant.username));
            }
        }
        EffectKind::Clear => {
            let Some(target) = subject else { return };
            let before = battle.user_effects.len();
            battle
                .user_effects
                .retain(|e| !(e.target == target && e.kind.is_hostile()));
            let removed = before - battle.user_effects.len();
            applied.push(AppliedEffect {
                kind: EffectKind::Clear,
                target: AppliedTarget::User(target),
                value: removed as i32,
            });
            if removed > 0 {
                parts.push(format!("cleansing {removed} harmful effects"));
            }
        }
        // Durational kinds share the storage path.
        EffectKind::DamageOverTime
        | EffectKind::HealOverTime
        | EffectKind::StatBuff { .. }
        | EffectKind::StatDebuff { .. }
        | EffectKind::Barrier
        | EffectKind::Stun => {
            store_effect(battle, template, creator, level, tile, round, applied);
            parts.push(format!("applying {}", template.kind.label()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Jutsu, ResourceCost};
    use crate::state::{Battle, BattleId, BattleType, JutsuSlot, PoolKind};
    use crate::template::CombatantTemplate;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixture() -> (Battle, BattleGrid, BattleConfig, DateTime<Utc>) {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let config = BattleConfig::default();
        let mut a = CombatantTemplate::new("Shira", 5).to_combatant(
            UserId(1),
            UserId(1),
            config.attacker_start,
            false,
            at,
        );
        let mut b = CombatantTemplate::new("Gen", 5).to_combatant(
            UserId(2),
            UserId(2),
            config.defender_start,
            false,
            at,
        );
        a.action_points = config.action_points;
        b.action_points = config.action_points;
        a.jutsus.push(JutsuSlot::new(
            Jutsu {
                id: "gale".into(),
                name: "Gale Palm".into(),
                school: CombatSchool::Ninjutsu,
                action_points: 40,
                cost: ResourceCost::chakra(10),
                range: 5,
                cooldown_seconds: 30,
                effects: vec![EffectTemplate {
                    kind: EffectKind::Damage,
                    target: TemplateTarget::Opponent,
                    base_power: 12,
                    power_per_level: 2,
                    rounds: None,
                    calculation: Calculation::Formula,
                }],
            },
            at - Duration::seconds(3600),
        ));
        let battle = Battle {
            id: BattleId(1),
            battle_type: BattleType::Sparring,
            version: 1,
            combatants: vec![a, b],
            user_effects: Vec::new(),
            ground_effects: Vec::new(),
            active_user: UserId(1),
            round: 1,
            created_at: at,
            updated_at: at,
            round_start_at: at,
        };
        (battle, BattleGrid::new(config.grid_width, config.grid_height), config, at)
    }

    fn ctx<'a>(
        grid: &'a BattleGrid,
        config: &'a BattleConfig,
        user: UserId,
        now: DateTime<Utc>,
    ) -> ActionContext<'a> {
        ActionContext {
            grid,
            config,
            context_user: user,
            now,
        }
    }

    #[test]
    fn rejections_leave_state_untouched() {
        let (battle, grid, config, now) = fixture();
        let mut rng = StdRng::seed_from_u64(7);

        let cases: Vec<(ActionContext<'_>, UserId, BattleAction, ActionError)> = vec![
            // Someone else's turn.
            (
                ctx(&grid, &config, UserId(2), now),
                UserId(2),
                BattleAction::new(ActionKind::Attack, Some(Position::new(4, 2))),
                ActionError::NotYourTurn,
            ),
            // Requester does not control the actor.
            (
                ctx(&grid, &config, UserId(2), now),
                UserId(1),
                BattleAction::new(ActionKind::Defend, None),
                ActionError::NotYourTurn,
            ),
            // Out of attack range.
            (
                ctx(&grid, &config, UserId(1), now),
                UserId(1),
                BattleAction::new(ActionKind::Attack, Some(Position::new(8, 2))),
                ActionError::OutOfRange,
            ),
            // Off the battlefield.
            (
                ctx(&grid, &config, UserId(1), now),
                UserId(1),
                BattleAction::new(ActionKind::Move, Some(Position::new(13, 2))),
                ActionError::OutOfBounds,
            ),
            // Nobody standing there.
            (
                ctx(&grid, &config, UserId(1), now),
                UserId(1),
                BattleAction::new(ActionKind::UseJutsu("gale".into()), Some(Position::new(6, 2))),
                ActionError::NoTargetAtTile,
            ),
            // Not equipped.
            (
                ctx(&grid, &config, UserId(1), now),
                UserId(1),
                BattleAction::new(ActionKind::UseJutsu("unknown".into()), Some(Position::new(8, 2))),
                ActionError::ActionNotAvailable,
            ),
        ];

        for (context, actor, action, expected) in cases {
            let mut attempt = battle.clone();
            let err = perform_battle_action(&mut attempt, &context, actor, &action, &mut rng)
                .expect_err("action should be rejected");
            assert_eq!(err, expected);
            assert_eq!(attempt, battle, "rejected action must not mutate state");
        }
    }

    #[test]
    fn insufficient_chakra_is_rejected_without_mutation() {
        let (mut battle, grid, config, now) = fixture();
        let caster = battle.combatant_mut(UserId(1)).unwrap();
        let drain = caster.chakra.current();
        caster.chakra.damage(drain);
        let snapshot = battle.clone();
        let mut rng = StdRng::seed_from_u64(7);

        let err = perform_battle_action(
            &mut battle,
            &ctx(&grid, &config, UserId(1), now),
            UserId(1),
            &BattleAction::new(ActionKind::UseJutsu("gale".into()), Some(Position::new(8, 2))),
            &mut rng,
        )
        .expect_err("cast should be rejected");
        assert_eq!(err, ActionError::InsufficientResources(PoolKind::Chakra));
        assert_eq!(battle, snapshot);
    }

    #[test]
    fn stunned_actor_cannot_submit_actions() {
        let (mut battle, grid, config, now) = fixture();
        let stun = EffectTemplate {
            kind: EffectKind::Stun,
            target: TemplateTarget::Opponent,
            base_power: 1,
            power_per_level: 0,
            rounds: Some(1),
            calculation: Calculation::Static,
        };
        battle
            .user_effects
            .push(realize(&stun, UserId(2), UserId(1), 1, 1, false));
        let mut rng = StdRng::seed_from_u64(7);

        let err = perform_battle_action(
            &mut battle,
            &ctx(&grid, &config, UserId(1), now),
            UserId(1),
            &BattleAction::new(ActionKind::Defend, None),
            &mut rng,
        )
        .expect_err("stunned actor must be rejected");
        assert_eq!(err, ActionError::Stunned);
    }

    #[test]
    fn jutsu_cast_pays_costs_and_damages_target() {
        let (mut battle, grid, config, now) = fixture();
        let mut rng = StdRng::seed_from_u64(7);
        let chakra_before = battle.combatant(UserId(1)).unwrap().chakra.current();
        let health_before = battle.combatant(UserId(2)).unwrap().health.current();

        let outcome = perform_battle_action(
            &mut battle,
            &ctx(&grid, &config, UserId(1), now),
            UserId(1),
            &BattleAction::new(ActionKind::UseJutsu("gale".into()), Some(Position::new(8, 2))),
            &mut rng,
        )
        .expect("cast should resolve");

        let caster = battle.combatant(UserId(1)).unwrap();
        assert_eq!(caster.chakra.current(), chakra_before - 10);
        assert_eq!(caster.action_points, config.action_points - 40);
        assert_eq!(caster.jutsus[0].last_used, now);
        assert_eq!(caster.acted_round, 1);
        assert_eq!(caster.used_actions, vec!["gale".to_string()]);
        assert_eq!(caster.used_stats, vec![CombatSchool::Ninjutsu]);

        let victim = battle.combatant(UserId(2)).unwrap();
        assert!(victim.health.current() < health_before);
        assert!(outcome.description.contains("Gale Palm"));
        assert!(outcome
            .applied
            .iter()
            .any(|a| matches!(a.kind, EffectKind::Damage)));
    }

    #[test]
    fn move_updates_position_within_range() {
        let (mut battle, grid, config, now) = fixture();
        let mut rng = StdRng::seed_from_u64(7);

        perform_battle_action(
            &mut battle,
            &ctx(&grid, &config, UserId(1), now),
            UserId(1),
            &BattleAction::new(ActionKind::Move, Some(Position::new(5, 3))),
            &mut rng,
        )
        .expect("move should resolve");
        assert_eq!(
            battle.combatant(UserId(1)).unwrap().position,
            Position::new(5, 3)
        );
    }

    #[test]
    fn attack_respects_barriers() {
        let (mut battle, grid, config, now) = fixture();
        battle.combatant_mut(UserId(2)).unwrap().position = Position::new(5, 2);
        let barrier = EffectTemplate {
            kind: EffectKind::Barrier,
            target: TemplateTarget::Caster,
            base_power: 500,
            power_per_level: 0,
            rounds: Some(3),
            calculation: Calculation::Static,
        };
        battle
            .user_effects
            .push(realize(&barrier, UserId(2), UserId(2), 1, 1, false));
        let health_before = battle.combatant(UserId(2)).unwrap().health.current();
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = perform_battle_action(
            &mut battle,
            &ctx(&grid, &config, UserId(1), now),
            UserId(1),
            &BattleAction::new(ActionKind::Attack, Some(Position::new(5, 2))),
            &mut rng,
        )
        .expect("attack should resolve");

        assert_eq!(
            battle.combatant(UserId(2)).unwrap().health.current(),
            health_before,
            "barrier soaks the whole hit"
        );
        assert!(outcome.description.contains("barrier absorbs"));
    }
}
