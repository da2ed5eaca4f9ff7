//! AI action provider.
//!
//! The decision policy is an external, replaceable collaborator: given the
//! current battle and grid it returns one action, or `None` to pass the turn.
//! The battle controller drives it inline in the same resolution loop as
//! human actions, bounded per request.

use async_trait::async_trait;
use battle_core::{
    ActionKind, AvailableAction, Battle, BattleAction, BattleConfig, BattleGrid, Combatant,
    Position, TemplateTarget, UserId, available_actions,
};
use chrono::{DateTime, Utc};

/// Chooses actions for AI combatants.
#[async_trait]
pub trait AiActionProvider: Send + Sync {
    /// Picks the next action for `actor`, or `None` to pass the turn.
    async fn provide_action(
        &self,
        battle: &Battle,
        grid: &BattleGrid,
        config: &BattleConfig,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Option<BattleAction>;
}

/// Default deterministic policy.
///
/// Casts the strongest affordable hostile jutsu in range of the nearest
/// opponent, falls back to a basic attack, closes distance otherwise, and
/// passes when nothing applies. Ties break in loadout order so replays are
/// stable.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAiProvider;

impl GreedyAiProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AiActionProvider for GreedyAiProvider {
    async fn provide_action(
        &self,
        battle: &Battle,
        grid: &BattleGrid,
        config: &BattleConfig,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Option<BattleAction> {
        let combatant = battle.combatant(actor)?;
        let opponent = nearest_opponent(battle, grid, combatant)?;
        let distance = grid.distance(combatant.position, opponent.position);
        let available = available_actions(combatant, config, now);

        tracing::debug!(
            actor = %actor,
            target = %opponent.user_id,
            distance,
            choices = available.len(),
            "selecting AI action"
        );

        // Strongest hostile jutsu that reaches the target.
        if let Some(action) = best_jutsu(combatant, &available, distance) {
            return Some(BattleAction::new(action, Some(opponent.position)));
        }

        // Basic attack when in reach.
        if available
            .iter()
            .any(|a| a.kind == ActionKind::Attack && a.range >= distance)
        {
            return Some(BattleAction::new(ActionKind::Attack, Some(opponent.position)));
        }

        // Close the distance one tile.
        if available.iter().any(|a| a.kind == ActionKind::Move)
            && let Some(step) = step_towards(battle, grid, combatant.position, opponent.position)
        {
            return Some(BattleAction::new(ActionKind::Move, Some(step)));
        }

        None
    }
}

fn nearest_opponent<'a>(
    battle: &'a Battle,
    grid: &BattleGrid,
    combatant: &Combatant,
) -> Option<&'a Combatant> {
    battle
        .opponents_of(combatant.controller)
        .min_by_key(|opponent| grid.distance(combatant.position, opponent.position))
}

/// Picks the equipped hostile jutsu with the highest summed base power among
/// those whose range covers `distance`.
fn best_jutsu(
    combatant: &Combatant,
    available: &[AvailableAction],
    distance: u32,
) -> Option<ActionKind> {
    available
        .iter()
        .filter(|action| action.range >= distance)
        .filter_map(|action| match &action.kind {
            ActionKind::UseJutsu(id) => combatant.jutsu_slot(id).map(|slot| (action, slot)),
            _ => None,
        })
        .filter_map(|(action, slot)| {
            let hostile_power: i32 = slot
                .jutsu
                .effects
                .iter()
                .filter(|t| {
                    t.kind.is_hostile() && matches!(t.target, TemplateTarget::Opponent)
                })
                .map(|t| t.power_at(combatant.level).max(1))
                .sum();
            (hostile_power > 0).then_some((action.kind.clone(), hostile_power))
        })
        .max_by_key(|(_, power)| *power)
        .map(|(kind, _)| kind)
}

/// One unoccupied in-bounds tile adjacent to `from` that shrinks the distance
/// to `towards`.
fn step_towards(
    battle: &Battle,
    grid: &BattleGrid,
    from: Position,
    towards: Position,
) -> Option<Position> {
    let current = grid.distance(from, towards);
    let mut best: Option<(u32, Position)> = None;
    for dl in -1..=1i32 {
        for dt in -1..=1i32 {
            if dl == 0 && dt == 0 {
                continue;
            }
            let candidate = Position::new(from.longitude + dl, from.latitude + dt);
            if !grid.contains(candidate) || battle.is_occupied(candidate) {
                continue;
            }
            let distance = grid.distance(candidate, towards);
            if distance < current && best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, candidate));
            }
        }
    }
    best.map(|(_, position)| position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        BattleId, BattleType, Calculation, CombatantTemplate, EffectKind, EffectTemplate, Jutsu,
        JutsuSlot, ResourceCost,
    };
    use chrono::{Duration, TimeZone};

    fn fixture(ai_position: Position, opponent_position: Position) -> (Battle, BattleGrid, BattleConfig, DateTime<Utc>) {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let config = BattleConfig::default();
        let mut ai = CombatantTemplate::new("Warden", 10).to_combatant(
            UserId(100),
            UserId(100),
            ai_position,
            true,
            at,
        );
        ai.action_points = config.action_points;
        ai.jutsus.push(JutsuSlot::new(
            Jutsu {
                id: "fireball".into(),
                name: "Fireball".into(),
                school: battle_core::CombatSchool::Ninjutsu,
                action_points: 40,
                cost: ResourceCost::chakra(15),
                range: 4,
                cooldown_seconds: 30,
                effects: vec![EffectTemplate {
                    kind: EffectKind::Damage,
                    target: TemplateTarget::Opponent,
                    base_power: 14,
                    power_per_level: 2,
                    rounds: None,
                    calculation: Calculation::Formula,
                }],
            },
            at - Duration::seconds(3600),
        ));
        let mut human = CombatantTemplate::new("Shira", 10).to_combatant(
            UserId(1),
            UserId(1),
            opponent_position,
            false,
            at,
        );
        human.action_points = config.action_points;
        let battle = Battle {
            id: BattleId(1),
            battle_type: BattleType::Arena,
            version: 1,
            combatants: vec![human, ai],
            user_effects: Vec::new(),
            ground_effects: Vec::new(),
            active_user: UserId(100),
            round: 1,
            created_at: at,
            updated_at: at,
            round_start_at: at,
        };
        let grid = BattleGrid::new(config.grid_width, config.grid_height);
        (battle, grid, config, at)
    }

    #[tokio::test]
    async fn casts_jutsu_when_in_range() {
        let (battle, grid, config, now) = fixture(Position::new(8, 2), Position::new(5, 2));
        let action = GreedyAiProvider::new()
            .provide_action(&battle, &grid, &config, UserId(100), now)
            .await
            .expect("AI should act");
        assert_eq!(action.kind, ActionKind::UseJutsu("fireball".into()));
        assert_eq!(action.target, Some(Position::new(5, 2)));
    }

    #[tokio::test]
    async fn closes_distance_when_out_of_range() {
        let (battle, grid, config, now) = fixture(Position::new(12, 4), Position::new(0, 0));
        let action = GreedyAiProvider::new()
            .provide_action(&battle, &grid, &config, UserId(100), now)
            .await
            .expect("AI should act");
        assert_eq!(action.kind, ActionKind::Move);
        let step = action.target.expect("move carries a target");
        assert!(grid.distance(step, Position::new(0, 0)) < grid.distance(Position::new(12, 4), Position::new(0, 0)));
    }

    #[tokio::test]
    async fn passes_without_action_points() {
        let (mut battle, grid, config, now) = fixture(Position::new(8, 2), Position::new(5, 2));
        battle.combatant_mut(UserId(100)).unwrap().action_points = 0;
        let action = GreedyAiProvider::new()
            .provide_action(&battle, &grid, &config, UserId(100), now)
            .await;
        assert!(action.is_none());
    }
}
