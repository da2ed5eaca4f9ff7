//! Turn and round scheduling.
//!
//! The scheduler is an explicit state machine over a battle's control state.
//! Every request aligns the battle first: who should act, whether the round
//! has been fully consumed, and whether the active actor is stunned. The
//! runtime drives transitions in a bounded loop; nothing here blocks waiting
//! for input.

use chrono::{DateTime, Utc};

use crate::action::{ActionOutcome, AppliedEffect, AppliedTarget};
use crate::effect::{EffectKind, apply_round_effects};
use crate::state::{Battle, UserId};

/// Where a battle's control flow currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlState {
    /// The given combatant should act next.
    AwaitingActor(UserId),
    /// The active combatant is stunned; their turn must be consumed by a
    /// forced no-op instead of blocking the battle.
    StunnedForcedSkip(UserId),
    /// Every live combatant has acted; the round must roll over.
    RoundComplete,
    /// At most one side remains; nothing further can be scheduled.
    BattleOver,
}

/// Result of aligning stored turn state against reality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub control: ControlState,
    /// Whether the current round has been fully consumed.
    pub progress_round: bool,
    /// Whether the aligned actor currently carries a stun.
    pub actor_stunned: bool,
}

impl Alignment {
    /// The combatant expected to act, when one exists.
    pub fn actor(&self) -> Option<UserId> {
        match self.control {
            ControlState::AwaitingActor(actor) | ControlState::StunnedForcedSkip(actor) => {
                Some(actor)
            }
            ControlState::RoundComplete | ControlState::BattleOver => None,
        }
    }
}

/// Computes the correct control state from stored `active_user`, `round`, and
/// each combatant's stun-effect presence.
///
/// The stored active actor wins when it is still a legal choice. When it is
/// not (it already acted, went down, or fled), the viewer's own combatant is
/// preferred among the remaining candidates, then submission order.
pub fn align_battle(battle: &Battle, viewer: Option<UserId>) -> Alignment {
    let sides: std::collections::BTreeSet<UserId> = battle
        .live_combatants()
        .map(|c| c.controller)
        .collect();
    if sides.len() <= 1 {
        return Alignment {
            control: ControlState::BattleOver,
            progress_round: false,
            actor_stunned: false,
        };
    }

    if battle.round_is_complete() {
        return Alignment {
            control: ControlState::RoundComplete,
            progress_round: true,
            actor_stunned: false,
        };
    }

    let candidates: Vec<UserId> = battle
        .live_combatants()
        .filter(|c| c.acted_round < battle.round)
        .map(|c| c.user_id)
        .collect();

    let actor = if candidates.contains(&battle.active_user) {
        battle.active_user
    } else if let Some(viewer) = viewer.filter(|v| candidates.contains(v)) {
        viewer
    } else {
        // Candidates cannot be empty here: an incomplete round means at
        // least one live combatant has not acted.
        candidates[0]
    };

    let stunned = battle.is_stunned(actor);
    Alignment {
        control: if stunned {
            ControlState::StunnedForcedSkip(actor)
        } else {
            ControlState::AwaitingActor(actor)
        },
        progress_round: false,
        actor_stunned: stunned,
    }
}

/// Rolls the battle into the next round.
///
/// Applies the effect stack for the completed round, then increments the
/// counter, re-stamps the round clock, and refills every live combatant's
/// action points. Returns log lines from the effect pass.
pub fn advance_round(battle: &mut Battle, action_points: u32, now: DateTime<Utc>) -> Vec<String> {
    let log = apply_round_effects(battle);

    battle.round += 1;
    battle.round_start_at = now;
    battle.updated_at = now;
    for combatant in &mut battle.combatants {
        if !combatant.is_gone() {
            combatant.action_points = action_points;
        }
    }

    log
}

/// Consumes a stunned combatant's turn with a true no-op.
///
/// No coordinates are required from the client and nothing about the battle
/// changes except turn bookkeeping. Produces a log entry so the skip is
/// visible in history.
pub fn perform_forced_skip(battle: &mut Battle, actor: UserId, now: DateTime<Utc>) -> ActionOutcome {
    let round = battle.round;
    let mut description = String::new();

    if let Some(combatant) = battle.combatant_mut(actor) {
        combatant.acted_round = round;
        combatant.updated_at = now;
        combatant.used_actions.push("stunned".into());
        description = format!("{} is stunned and loses their turn", combatant.username);
    }
    battle.updated_at = now;

    ActionOutcome {
        description,
        applied: vec![AppliedEffect {
            kind: EffectKind::Stun,
            target: AppliedTarget::User(actor),
            value: 0,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::effect::{Calculation, EffectTemplate, TemplateTarget, realize};
    use crate::state::{BattleId, BattleType, Position};
    use crate::template::CombatantTemplate;
    use chrono::TimeZone;

    fn battle() -> Battle {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut a = CombatantTemplate::new("A", 5).to_combatant(
            UserId(1),
            UserId(1),
            Position::new(4, 2),
            false,
            at,
        );
        let mut b = CombatantTemplate::new("B", 5).to_combatant(
            UserId(2),
            UserId(2),
            Position::new(8, 2),
            false,
            at,
        );
        a.action_points = 100;
        b.action_points = 100;
        Battle {
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
        }
    }

    fn stun(target: UserId) -> crate::effect::UserEffect {
        let template = EffectTemplate {
            kind: EffectKind::Stun,
            target: TemplateTarget::Opponent,
            base_power: 1,
            power_per_level: 0,
            rounds: Some(1),
            calculation: Calculation::Static,
        };
        realize(&template, UserId(99), target, 1, 1, false)
    }

    #[test]
    fn stored_active_user_wins_while_legal() {
        let battle = battle();
        let alignment = align_battle(&battle, Some(UserId(2)));
        assert_eq!(alignment.control, ControlState::AwaitingActor(UserId(1)));
    }

    #[test]
    fn viewer_is_preferred_when_stored_actor_already_acted() {
        let mut battle = battle();
        battle.combatant_mut(UserId(1)).unwrap().acted_round = 1;
        let alignment = align_battle(&battle, Some(UserId(2)));
        assert_eq!(alignment.control, ControlState::AwaitingActor(UserId(2)));
    }

    #[test]
    fn stunned_actor_yields_forced_skip_state() {
        let mut battle = battle();
        battle.user_effects.push(stun(UserId(1)));
        let alignment = align_battle(&battle, None);
        assert_eq!(alignment.control, ControlState::StunnedForcedSkip(UserId(1)));
        assert!(alignment.actor_stunned);
    }

    #[test]
    fn forced_skip_consumes_turn_exactly_once() {
        let mut battle = battle();
        battle.user_effects.push(stun(UserId(1)));
        let now = battle.created_at;

        let outcome = perform_forced_skip(&mut battle, UserId(1), now);
        assert!(outcome.description.contains("stunned"));
        assert_eq!(battle.combatant(UserId(1)).unwrap().acted_round, 1);

        // The skipped combatant is no longer a candidate this round.
        let alignment = align_battle(&battle, None);
        assert_eq!(alignment.control, ControlState::AwaitingActor(UserId(2)));
    }

    #[test]
    fn round_completion_and_rollover() {
        let mut battle = battle();
        battle.combatant_mut(UserId(1)).unwrap().acted_round = 1;
        battle.combatant_mut(UserId(2)).unwrap().acted_round = 1;

        let alignment = align_battle(&battle, None);
        assert_eq!(alignment.control, ControlState::RoundComplete);
        assert!(alignment.progress_round);

        let config = BattleConfig::default();
        let later = battle.created_at + chrono::Duration::seconds(30);
        advance_round(&mut battle, config.action_points, later);
        assert_eq!(battle.round, 2);
        assert_eq!(battle.round_start_at, later);
        assert_eq!(
            battle.combatant(UserId(1)).unwrap().action_points,
            config.action_points
        );

        let alignment = align_battle(&battle, None);
        assert_eq!(alignment.control, ControlState::AwaitingActor(UserId(1)));
    }

    #[test]
    fn battle_over_when_one_side_remains() {
        let mut battle = battle();
        let b = battle.combatant_mut(UserId(2)).unwrap();
        let all = b.health.current();
        b.health.damage(all);
        let alignment = align_battle(&battle, None);
        assert_eq!(alignment.control, ControlState::BattleOver);
    }
}
