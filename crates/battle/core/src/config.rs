//! Engine configuration.
//!
//! All tunables live here rather than as scattered constants so the runtime
//! can load overrides from data files and tests can shrink the numbers.

use crate::state::Position;

/// Tunable battle rules.
///
/// The defaults describe the production arena; loaders may replace any field
/// from a TOML table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Battle grid width in tiles.
    pub grid_width: u32,
    /// Battle grid height in tiles.
    pub grid_height: u32,

    /// Action point budget refilled at the start of each combatant's round.
    pub action_points: u32,

    /// Starting tile for the initiating side.
    pub attacker_start: Position,
    /// Starting tile for the defending side.
    pub defender_start: Position,

    /// Upper bound on AI actions chained inside a single request.
    pub ai_action_cap: u32,

    /// Number of hazard tiles scattered at initiation.
    pub ground_hazards: u32,
    /// Damage per round dealt by a hazard tile.
    pub hazard_power: i32,

    // ------------------------------------------------------------------------
    // Basic action costs
    // ------------------------------------------------------------------------
    /// Action points consumed by a basic attack.
    pub attack_action_points: u32,
    /// Stamina consumed by a basic attack.
    pub attack_stamina: u32,
    /// Reach of a basic attack in tiles.
    pub attack_range: u32,
    /// Action points consumed by a one-tile move.
    pub move_action_points: u32,
    /// Action points consumed by defending.
    pub defend_action_points: u32,
    /// Defence bonus granted for one round by defending.
    pub defend_power: i32,
    /// Action points consumed by a flee attempt.
    pub flee_action_points: u32,
    /// Base probability that a flee attempt succeeds.
    pub flee_chance: f64,

    // ------------------------------------------------------------------------
    // Rewards
    // ------------------------------------------------------------------------
    /// Experience awarded per defeated-opponent level before scaling.
    pub experience_per_level: f64,
    /// Money looted per defeated opponent in combat battles.
    pub money_per_kill: i64,
    /// Trailing window, in minutes, for repeat-encounter reward damping.
    pub reward_window_minutes: i64,

    /// Seconds a freshly defeated user stays immune to new attacks.
    pub immunity_seconds: i64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            grid_width: 13,
            grid_height: 5,
            action_points: 100,
            attacker_start: Position::new(4, 2),
            defender_start: Position::new(8, 2),
            ai_action_cap: 5,
            ground_hazards: 2,
            hazard_power: 5,
            attack_action_points: 40,
            attack_stamina: 10,
            attack_range: 2,
            move_action_points: 30,
            defend_action_points: 20,
            defend_power: 10,
            flee_action_points: 100,
            flee_chance: 0.35,
            experience_per_level: 12.0,
            money_per_kill: 50,
            reward_window_minutes: 60,
            immunity_seconds: 300,
        }
    }
}
