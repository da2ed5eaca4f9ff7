//! Battle result evaluation.
//!
//! A battle is over *for a viewer* once one side has been cleared: every
//! member downed, fled, or gone. Evaluation is deterministic given the battle
//! state; randomness lives in action resolution and AI choice, never here.

use crate::config::BattleConfig;
use crate::state::{Battle, BattleType, UserId};

/// Terminal outcome for one viewer, including reward deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    /// Live combatants on the viewer's side.
    pub friends_left: u32,
    /// Live combatants on the opposing side.
    pub targets_left: u32,
    pub experience: f64,
    pub money: i64,
    /// Repeat-encounter damping applied to the deltas above.
    pub reward_scaling: f64,
}

impl BattleResult {
    pub fn is_victory(&self) -> bool {
        self.targets_left == 0 && self.friends_left > 0
    }
}

/// Damping factor for repeated encounters between the same two humans.
///
/// Zero prior encounters in the trailing window leaves rewards untouched;
/// `n` prior encounters scale them by `1 / (n + 1)`.
pub fn reward_scaling(prior_encounters: u32) -> f64 {
    1.0 / (prior_encounters as f64 + 1.0)
}

/// Evaluates whether the battle has ended for `viewer`.
///
/// Combatants controlled by the viewer are friends; everyone else is a
/// target. Returns `None` while both sides still stand (or the viewer is not
/// part of the battle at all). `prior_encounters` is the trailing-window
/// count the persistence layer reads from the history ledger.
pub fn calc_battle_result(
    battle: &Battle,
    viewer: UserId,
    config: &BattleConfig,
    prior_encounters: u32,
) -> Option<BattleResult> {
    if !battle.combatants.iter().any(|c| c.controller == viewer) {
        return None;
    }

    let friends_left = battle
        .live_combatants()
        .filter(|c| c.controller == viewer)
        .count() as u32;
    let targets_left = battle
        .live_combatants()
        .filter(|c| c.controller != viewer)
        .count() as u32;

    if friends_left > 0 && targets_left > 0 {
        return None;
    }

    let scaling = reward_scaling(prior_encounters);
    let mut experience = 0.0;
    let mut money = 0;

    if targets_left == 0 && friends_left > 0 {
        // Fled opponents grant nothing; only defeated ones count.
        let defeated_levels: u32 = battle
            .combatants
            .iter()
            .filter(|c| c.controller != viewer && c.is_defeated())
            .map(|c| c.level)
            .sum();
        experience = defeated_levels as f64 * config.experience_per_level * scaling;

        if battle.battle_type == BattleType::Combat {
            let kills = battle
                .combatants
                .iter()
                .filter(|c| c.controller != viewer && c.is_defeated())
                .count() as i64;
            money = ((kills * config.money_per_kill) as f64 * scaling).round() as i64;
        }
    }

    Some(BattleResult {
        friends_left,
        targets_left,
        experience,
        money,
        reward_scaling: scaling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BattleId, Position};
    use crate::template::CombatantTemplate;
    use chrono::{TimeZone, Utc};

    fn battle(battle_type: BattleType) -> Battle {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = CombatantTemplate::new("A", 5).to_combatant(
            UserId(1),
            UserId(1),
            Position::new(4, 2),
            false,
            at,
        );
        let b = CombatantTemplate::new("B", 8).to_combatant(
            UserId(2),
            UserId(2),
            Position::new(8, 2),
            false,
            at,
        );
        Battle {
            id: BattleId(1),
            battle_type,
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

    #[test]
    fn scaling_table() {
        assert_eq!(reward_scaling(0), 1.0);
        assert_eq!(reward_scaling(1), 0.5);
        assert_eq!(reward_scaling(3), 0.25);
    }

    #[test]
    fn ongoing_battle_yields_none() {
        let battle = battle(BattleType::Combat);
        let config = BattleConfig::default();
        assert!(calc_battle_result(&battle, UserId(1), &config, 0).is_none());
        assert!(calc_battle_result(&battle, UserId(2), &config, 0).is_none());
    }

    #[test]
    fn cleared_opponents_yield_scaled_rewards() {
        let mut battle = battle(BattleType::Combat);
        let config = BattleConfig::default();
        let b = battle.combatant_mut(UserId(2)).unwrap();
        let all = b.health.current();
        b.health.damage(all);

        let result = calc_battle_result(&battle, UserId(1), &config, 0).expect("battle is over");
        assert_eq!(result.targets_left, 0);
        assert_eq!(result.friends_left, 1);
        assert!(result.is_victory());
        assert_eq!(result.experience, 8.0 * config.experience_per_level);
        assert_eq!(result.money, config.money_per_kill);

        let damped = calc_battle_result(&battle, UserId(1), &config, 1).expect("battle is over");
        assert_eq!(damped.reward_scaling, 0.5);
        assert_eq!(damped.experience, result.experience / 2.0);
    }

    #[test]
    fn fled_opponent_grants_no_rewards() {
        let mut battle = battle(BattleType::Combat);
        let config = BattleConfig::default();
        battle.combatant_mut(UserId(2)).unwrap().fled_battle = true;

        let result = calc_battle_result(&battle, UserId(1), &config, 0).expect("battle is over");
        assert_eq!(result.targets_left, 0);
        assert_eq!(result.experience, 0.0);
        assert_eq!(result.money, 0);
    }

    #[test]
    fn loser_sees_zero_deltas() {
        let mut battle = battle(BattleType::Combat);
        let config = BattleConfig::default();
        let a = battle.combatant_mut(UserId(1)).unwrap();
        let all = a.health.current();
        a.health.damage(all);

        let result = calc_battle_result(&battle, UserId(1), &config, 0).expect("battle is over");
        assert_eq!(result.friends_left, 0);
        assert!(!result.is_victory());
        assert_eq!(result.experience, 0.0);
        assert_eq!(result.money, 0);
    }
}
