//! Persistence/concurrency controller.
//!
//! [`BattleController`] owns the whole request path: load a fresh snapshot of
//! the battle row, drive the scheduler and action resolver on the local copy,
//! evaluate the result, and commit under a version compare-and-swap. A lost
//! race discards the local work and redoes it from a fresh read, bounded by
//! explicit counters rather than open-ended loops.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use battle_core::{
    ActionOutcome, AppliedEffect, Battle, BattleAction, BattleConfig, BattleGrid, BattleId,
    BattleResult, BattleType, Calculation, Combatant, CombatantTemplate, ControlState, EffectKind,
    EffectTemplate, ItemSlot, JutsuSlot, Position, ResourceMeter, TemplateTarget, UserId,
    advance_round, align_battle, calc_battle_result, perform_battle_action, perform_forced_skip,
    realize, realize_ground,
};
use battle_content::ContentCatalog;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::api::{
    GetBattleResponse, InitiateOutcome, PerformActionResponse, Result, RuntimeError,
};
use crate::events::{BattleUpdateEvent, ChannelPublisher, battle_channel};
use crate::providers::AiActionProvider;
use crate::repository::{
    BattleEntry, BattleRepository, EntryRepository, HistoryRepository, HistoryRow,
    RepositoryError, UserRepository,
};
use crate::user::{UserProfile, UserStatus};

/// Reads of the battle row per request before giving up.
const FETCH_ATTEMPTS: u32 = 3;
/// Version-conflict retries per request before surfacing the failure.
const COMMIT_RETRIES: u32 = 2;
/// Hard ceiling on scheduler transitions inside one request, over and above
/// the AI action cap. Guards against a cycle that never reaches a human.
const MAX_RESOLUTION_STEPS: u32 = 32;

/// Creator id for environment-owned ground hazards.
const ENVIRONMENT: UserId = UserId(0);
/// Synthetic id space for arena AIs; never collides with real users.
const AI_ID_BASE: u64 = 1 << 62;

/// The battle subsystem's service object. Constructed once at startup with
/// every collaborator injected.
pub struct BattleController {
    battles: Arc<dyn BattleRepository>,
    users: Arc<dyn UserRepository>,
    history: Arc<dyn HistoryRepository>,
    entries: Arc<dyn EntryRepository>,
    publisher: Arc<dyn ChannelPublisher>,
    ai: Arc<dyn AiActionProvider>,
    catalog: Arc<ContentCatalog>,
    config: BattleConfig,
    grid: BattleGrid,
    rng: Mutex<StdRng>,
    next_battle_id: AtomicU64,
    next_ai_id: AtomicU64,
}

enum Defender {
    User(Box<UserProfile>),
    Ai(CombatantTemplate),
}

impl BattleController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        battles: Arc<dyn BattleRepository>,
        users: Arc<dyn UserRepository>,
        history: Arc<dyn HistoryRepository>,
        entries: Arc<dyn EntryRepository>,
        publisher: Arc<dyn ChannelPublisher>,
        ai: Arc<dyn AiActionProvider>,
        catalog: Arc<ContentCatalog>,
        config: BattleConfig,
        rng_seed: u64,
    ) -> Self {
        let grid = BattleGrid::new(config.grid_width, config.grid_height);
        Self {
            battles,
            users,
            history,
            entries,
            publisher,
            ai,
            catalog,
            config,
            grid,
            rng: Mutex::new(StdRng::seed_from_u64(rng_seed)),
            next_battle_id: AtomicU64::new(1),
            next_ai_id: AtomicU64::new(1),
        }
    }

    pub fn grid(&self) -> &BattleGrid {
        &self.grid
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    // ========================================================================
    // Initiation
    // ========================================================================

    /// Starts a PvP battle, enforcing positional adjacency, sector match, and
    /// the defender's immunity window.
    pub async fn attack_user(
        &self,
        viewer: UserId,
        target: UserId,
        longitude: i32,
        latitude: i32,
        sector: u32,
        now: DateTime<Utc>,
    ) -> Result<InitiateOutcome> {
        if viewer == target {
            return Ok(InitiateOutcome::deny("You cannot attack yourself"));
        }
        let attacker = self
            .users
            .fetch_regenerated_user(viewer, now)
            .await?
            .ok_or(RuntimeError::UserNotFound(viewer))?;
        let Some(defender) = self.users.fetch_regenerated_user(target, now).await? else {
            return Ok(InitiateOutcome::deny("Target does not exist"));
        };

        if attacker.sector != sector || defender.sector != sector {
            return Ok(InitiateOutcome::deny("Target is not in this sector"));
        }
        if defender.location != Position::new(longitude, latitude) {
            return Ok(InitiateOutcome::deny("Target is no longer at that location"));
        }
        if self.grid_distance_world(attacker.location, defender.location) > 1 {
            return Ok(InitiateOutcome::deny("Target is too far away"));
        }
        if defender.is_immune(now) {
            return Ok(InitiateOutcome::deny("Target is immune from battle"));
        }

        self.initiate_battle(BattleType::Combat, attacker, Defender::User(Box::new(defender)), now)
            .await
    }

    /// Matches the caller against the arena opponent nearest their level.
    pub async fn start_arena_battle(
        &self,
        viewer: UserId,
        now: DateTime<Utc>,
    ) -> Result<InitiateOutcome> {
        let challenger = self
            .users
            .fetch_regenerated_user(viewer, now)
            .await?
            .ok_or(RuntimeError::UserNotFound(viewer))?;
        let opponent = self
            .catalog
            .nearest_level_opponent(challenger.level)
            .ok_or(RuntimeError::EmptyArenaRoster)?
            .clone();

        self.initiate_battle(BattleType::Arena, challenger, Defender::Ai(opponent), now)
            .await
    }

    async fn initiate_battle(
        &self,
        battle_type: BattleType,
        attacker: UserProfile,
        defender: Defender,
        now: DateTime<Utc>,
    ) -> Result<InitiateOutcome> {
        if attacker.status != UserStatus::Awake {
            return Ok(InitiateOutcome::deny("You must be awake to start a fight"));
        }
        if attacker.battle_id.is_some() {
            return Ok(InitiateOutcome::deny("You are already in a battle"));
        }
        if let Defender::User(user) = &defender {
            if user.status != UserStatus::Awake {
                return Ok(InitiateOutcome::deny("Target is not awake"));
            }
            if user.battle_id.is_some() {
                return Ok(InitiateOutcome::deny("Target is already in a battle"));
            }
        }

        let battle_id = BattleId(self.next_battle_id.fetch_add(1, Ordering::Relaxed));
        let mut attacker_side = self.assemble_combatant(
            &attacker.to_template(),
            attacker.id,
            attacker.id,
            self.config.attacker_start,
            false,
            now,
        )?;
        carry_pools(&mut attacker_side, &attacker);
        let (defender_side, mut updated_users, history) = match defender {
            Defender::User(user) => {
                let mut combatant = self.assemble_combatant(
                    &user.to_template(),
                    user.id,
                    user.id,
                    self.config.defender_start,
                    false,
                    now,
                )?;
                carry_pools(&mut combatant, &user);
                // Arena battles never reach this arm; every PvP type leaves a
                // ledger row for reward damping.
                let row = HistoryRow {
                    attacker: attacker.id,
                    defender: user.id,
                    created_at: now,
                };
                (combatant, vec![*user], Some(row))
            }
            Defender::Ai(template) => {
                let ai_id = UserId(AI_ID_BASE + self.next_ai_id.fetch_add(1, Ordering::Relaxed));
                let combatant =
                    self.assemble_combatant(&template, ai_id, ai_id, self.config.defender_start, true, now)?;
                (combatant, Vec::new(), None)
            }
        };

        let mut battle = Battle {
            id: battle_id,
            battle_type,
            version: 1,
            combatants: vec![attacker_side, defender_side],
            user_effects: Vec::new(),
            ground_effects: Vec::new(),
            active_user: attacker.id,
            round: 1,
            created_at: now,
            updated_at: now,
            round_start_at: now,
        };
        self.seed_passives(&mut battle);
        self.scatter_hazards(&mut battle).await;

        let mut attacker_row = attacker;
        attacker_row.status = UserStatus::Battle;
        attacker_row.battle_id = Some(battle_id);
        for user in &mut updated_users {
            user.status = UserStatus::Battle;
            user.battle_id = Some(battle_id);
        }
        let mut rows = vec![attacker_row];
        rows.append(&mut updated_users);

        self.battles.insert_battle(battle, rows, history).await?;
        tracing::info!(battle = %battle_id, ?battle_type, "battle initiated");
        Ok(InitiateOutcome::Started { battle_id })
    }

    fn assemble_combatant(
        &self,
        template: &CombatantTemplate,
        user_id: UserId,
        controller: UserId,
        position: Position,
        is_ai: bool,
        now: DateTime<Utc>,
    ) -> Result<Combatant> {
        let mut combatant = template.to_combatant(user_id, controller, position, is_ai, now);
        combatant.action_points = self.config.action_points;
        for id in &template.jutsu_ids {
            let jutsu = self
                .catalog
                .jutsu(id)
                .ok_or_else(|| RuntimeError::UnknownContent(id.clone()))?;
            // Cooldown clocks rewind to battle start so everything is ready
            // in round one; cooldown carried from the outside world would be
            // seeded here instead.
            let last_used = now - Duration::seconds(jutsu.cooldown_seconds);
            combatant.jutsus.push(JutsuSlot::new(jutsu.clone(), last_used));
        }
        for id in &template.item_ids {
            let item = self
                .catalog
                .item(id)
                .ok_or_else(|| RuntimeError::UnknownContent(id.clone()))?;
            let last_used = now - Duration::seconds(item.cooldown_seconds);
            combatant.items.push(ItemSlot::new(item.clone(), 2, last_used));
        }
        Ok(combatant)
    }

    /// Realizes bloodline and equipped-item passives for every combatant.
    fn seed_passives(&self, battle: &mut Battle) {
        let mut realized = Vec::new();
        for combatant in &battle.combatants {
            let mut templates: Vec<EffectTemplate> = Vec::new();
            if let Some(bloodline_id) = &combatant.bloodline_id
                && let Some(bloodline) = self.catalog.bloodline(bloodline_id)
            {
                templates.extend(bloodline.passives.iter().cloned());
            }
            for slot in &combatant.items {
                templates.extend(slot.item.passive_effects.iter().cloned());
            }
            for template in templates {
                realized.push(realize(
                    &template,
                    combatant.user_id,
                    combatant.user_id,
                    combatant.level,
                    battle.round,
                    false,
                ));
            }
        }
        battle.user_effects.extend(realized);
    }

    /// Places random hazard tiles, avoiding occupied and already-hazardous
    /// ones.
    async fn scatter_hazards(&self, battle: &mut Battle) {
        let template = EffectTemplate {
            kind: EffectKind::DamageOverTime,
            target: TemplateTarget::Ground,
            base_power: self.config.hazard_power,
            power_per_level: 0,
            rounds: None,
            calculation: Calculation::Static,
        };
        let mut rng = self.rng.lock().await;
        let mut placed = 0;
        let mut tries = 0;
        while placed < self.config.ground_hazards && tries < 50 {
            tries += 1;
            let position = Position::new(
                rng.gen_range(0..self.config.grid_width as i32),
                rng.gen_range(0..self.config.grid_height as i32),
            );
            if battle.is_occupied(position)
                || battle.ground_effects.iter().any(|e| e.position == position)
            {
                continue;
            }
            battle.ground_effects.push(realize_ground(
                &template,
                ENVIRONMENT,
                position,
                1,
                battle.round,
                false,
            ));
            placed += 1;
        }
    }

    fn grid_distance_world(&self, a: Position, b: Position) -> u32 {
        (a.longitude - b.longitude)
            .unsigned_abs()
            .max((a.latitude - b.latitude).unsigned_abs())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current aligned, masked battle state for a viewer.
    pub async fn get_battle(
        &self,
        viewer: UserId,
        battle_id: Option<BattleId>,
    ) -> Result<GetBattleResponse> {
        let battle_id = match battle_id {
            Some(id) => Some(id),
            None => self
                .users
                .fetch_user(viewer)
                .await?
                .and_then(|user| user.battle_id),
        };
        let Some(battle_id) = battle_id else {
            return Ok(GetBattleResponse {
                battle: None,
                result: None,
            });
        };
        let Some(mut battle) = self.battles.fetch_battle(battle_id).await? else {
            return Ok(GetBattleResponse {
                battle: None,
                result: None,
            });
        };

        let alignment = align_battle(&battle, Some(viewer));
        if let Some(actor) = alignment.actor() {
            battle.active_user = actor;
        }
        let result = self.result_for(&battle, viewer).await?;
        Ok(GetBattleResponse {
            battle: Some(mask_battle(&battle, viewer)),
            result,
        })
    }

    /// Recent action history for a battle, newest first, capped at 30.
    pub async fn get_battle_entries(&self, battle_id: BattleId) -> Result<Vec<BattleEntry>> {
        Ok(self.entries.recent_entries(battle_id, 30).await?)
    }

    // ========================================================================
    // Action handling
    // ========================================================================

    /// Handles one action request under optimistic concurrency.
    ///
    /// The read-resolve-commit cycle repeats from a fresh snapshot when the
    /// commit loses the version race, bounded by [`FETCH_ATTEMPTS`] and
    /// [`COMMIT_RETRIES`]. A resolution that changes nothing is reported as a
    /// no-op instead of committed.
    pub async fn perform_action(
        &self,
        viewer: UserId,
        battle_id: BattleId,
        action: Option<BattleAction>,
        now: DateTime<Utc>,
    ) -> Result<PerformActionResponse> {
        let mut commit_failures = 0;

        for attempt in 1..=FETCH_ATTEMPTS {
            let Some(mut battle) = self.battles.fetch_battle(battle_id).await? else {
                return Ok(PerformActionResponse {
                    update_client: true,
                    ..PerformActionResponse::notice("The battle has ended")
                });
            };
            let read_version = battle.version;

            let resolution = self.resolve(&mut battle, viewer, action.clone(), now).await;
            let result = self.result_for(&battle, viewer).await?;

            // A no-op attempt is reported back, not committed. A terminal
            // battle still settles even when this request changed nothing;
            // someone has to fold the result back.
            if !resolution.changed && result.is_none() {
                return Ok(PerformActionResponse {
                    update_client: false,
                    battle: Some(mask_battle(&battle, viewer)),
                    result: None,
                    notification: resolution.notification,
                    log_entries: Vec::new(),
                });
            }
            let entries: Vec<BattleEntry> = resolution
                .logs
                .iter()
                .map(|(round, description, applied)| BattleEntry {
                    battle_id,
                    round: *round,
                    description: description.clone(),
                    applied: applied.clone(),
                    created_at: now,
                })
                .collect();

            let commit = if result.is_some() {
                self.settle(&battle, read_version, now).await
            } else {
                // Spectators get the version bump before the commit lands so
                // they refetch promptly; a lost race just means one spurious
                // refetch.
                self.publisher
                    .publish(
                        &battle_channel(battle_id),
                        serde_json::to_value(BattleUpdateEvent {
                            battle_id: battle_id.0,
                            version: read_version + 1,
                            round: battle.round,
                        })
                        .unwrap_or_default(),
                    )
                    .await;
                self.battles
                    .commit_battle(read_version, battle.clone())
                    .await
                    .map(|_| ())
            };

            match commit {
                Ok(()) => {
                    self.entries.append_entries(entries.clone()).await?;
                    let terminal = result.is_some();
                    tracing::debug!(
                        battle = %battle_id,
                        version = read_version + 1,
                        terminal,
                        "action committed"
                    );
                    return Ok(PerformActionResponse {
                        update_client: true,
                        battle: (!terminal).then(|| mask_battle(&battle, viewer)),
                        result,
                        notification: resolution.notification,
                        log_entries: entries,
                    });
                }
                Err(RepositoryError::VersionConflict { expected, stored }) => {
                    commit_failures += 1;
                    tracing::warn!(
                        battle = %battle_id,
                        attempt,
                        expected,
                        stored,
                        "version conflict, retrying from fresh snapshot"
                    );
                    if commit_failures > COMMIT_RETRIES {
                        return Err(RuntimeError::ConcurrentModification);
                    }
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(RuntimeError::ConcurrentModification)
    }

    /// Drives the scheduler on a local battle copy until it needs input this
    /// request cannot supply.
    async fn resolve(
        &self,
        battle: &mut Battle,
        viewer: UserId,
        mut submitted: Option<BattleAction>,
        now: DateTime<Utc>,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        let mut ai_steps = 0;
        let mut steps = 0;

        loop {
            steps += 1;
            if steps > MAX_RESOLUTION_STEPS {
                tracing::warn!(battle = %battle.id, "resolution step ceiling hit");
                break;
            }

            let alignment = align_battle(battle, Some(viewer));
            match alignment.control {
                ControlState::BattleOver => break,
                ControlState::RoundComplete => {
                    let closing = battle.round;
                    let lines = advance_round(battle, self.config.action_points, now);
                    resolution.changed = true;
                    for line in lines {
                        resolution.logs.push((closing, line, Vec::new()));
                    }
                }
                ControlState::StunnedForcedSkip(actor) => {
                    if battle.active_user != actor {
                        battle.active_user = actor;
                    }
                    let outcome = perform_forced_skip(battle, actor, now);
                    resolution.changed = true;
                    resolution.push(battle.round, outcome);
                }
                ControlState::AwaitingActor(actor) => {
                    if battle.active_user != actor {
                        battle.active_user = actor;
                        resolution.changed = true;
                    }
                    let Some(combatant) = battle.combatant(actor) else {
                        break;
                    };

                    if combatant.is_ai && combatant.controller == actor {
                        if ai_steps >= self.config.ai_action_cap {
                            break;
                        }
                        ai_steps += 1;
                        self.drive_ai(battle, actor, now, &mut resolution).await;
                    } else if combatant.controller == viewer {
                        let Some(action) = submitted.take() else {
                            break;
                        };
                        let context = battle_core::ActionContext {
                            grid: &self.grid,
                            config: &self.config,
                            context_user: viewer,
                            now,
                        };
                        let mut rng = self.rng.lock().await;
                        match perform_battle_action(battle, &context, actor, &action, &mut *rng) {
                            Ok(outcome) => {
                                resolution.changed = true;
                                resolution.push(battle.round, outcome);
                            }
                            Err(error) => {
                                resolution.notification = Some(error.to_string());
                                break;
                            }
                        }
                    } else {
                        // Another human's turn; nothing more to do here.
                        if submitted.is_some() && resolution.notification.is_none() {
                            resolution.notification = Some("It is not your turn".into());
                        }
                        break;
                    }
                }
            }
        }

        if let Some(action) = submitted {
            // The submitted action never became applicable (e.g. the battle
            // ended first); tell the requester instead of silently dropping.
            if resolution.notification.is_none() {
                resolution.notification = Some("Action could not be applied".into());
            }
            tracing::debug!(?action, "submitted action was not consumed");
        }

        resolution
    }

    /// One AI turn: ask the provider, apply its choice, or consume the turn
    /// as a pass when it has none.
    async fn drive_ai(
        &self,
        battle: &mut Battle,
        actor: UserId,
        now: DateTime<Utc>,
        resolution: &mut Resolution,
    ) {
        let choice = self
            .ai
            .provide_action(battle, &self.grid, &self.config, actor, now)
            .await;

        match choice {
            Some(action) => {
                let context = battle_core::ActionContext {
                    grid: &self.grid,
                    config: &self.config,
                    context_user: actor,
                    now,
                };
                let mut rng = self.rng.lock().await;
                match perform_battle_action(battle, &context, actor, &action, &mut *rng) {
                    Ok(outcome) => {
                        resolution.changed = true;
                        resolution.push(battle.round, outcome);
                    }
                    Err(error) => {
                        // A provider bug must not wedge the battle; burn the
                        // turn and keep going.
                        tracing::warn!(%actor, %error, "AI chose an illegal action");
                        consume_turn_as_pass(battle, actor, now, resolution);
                    }
                }
            }
            None => consume_turn_as_pass(battle, actor, now, resolution),
        }
    }

    // ========================================================================
    // Terminal handling
    // ========================================================================

    async fn result_for(&self, battle: &Battle, viewer: UserId) -> Result<Option<BattleResult>> {
        let prior = self.prior_encounters(battle).await?;
        Ok(calc_battle_result(battle, viewer, &self.config, prior))
    }

    /// Encounters between the two human originals inside the trailing reward
    /// window, excluding this battle's own ledger row.
    async fn prior_encounters(&self, battle: &Battle) -> std::result::Result<u32, RepositoryError> {
        if battle.battle_type != BattleType::Combat {
            return Ok(0);
        }
        let humans: Vec<UserId> = battle
            .combatants
            .iter()
            .filter(|c| !c.is_ai && c.is_original)
            .map(|c| c.user_id)
            .collect();
        let [a, b] = humans[..] else {
            return Ok(0);
        };
        let since = battle.created_at - Duration::minutes(self.config.reward_window_minutes);
        Ok(self
            .history
            .count_encounters(a, b, since, battle.created_at)
            .await?)
    }

    /// Terminal commit: folds combatant deltas into the durable user rows and
    /// deletes the battle row, all version-guarded.
    async fn settle(
        &self,
        battle: &Battle,
        read_version: u64,
        now: DateTime<Utc>,
    ) -> std::result::Result<(), RepositoryError> {
        let mut folded = Vec::new();
        for combatant in &battle.combatants {
            if combatant.is_ai || !combatant.is_original {
                continue;
            }
            let Some(mut user) = self
                .users
                .fetch_user(combatant.user_id)
                .await?
            else {
                continue;
            };

            user.health = ResourceMeter::new(combatant.health.current().max(1), user.health.max());
            user.chakra = ResourceMeter::new(combatant.chakra.current(), user.chakra.max());
            user.stamina = ResourceMeter::new(combatant.stamina.current(), user.stamina.max());
            user.battle_id = None;
            user.updated_at = now;

            if combatant.is_defeated() {
                user.status = UserStatus::Hospitalized;
                user.immune_until = Some(now + Duration::seconds(self.config.immunity_seconds));
            } else {
                user.status = UserStatus::Awake;
            }

            let prior = self.prior_encounters(battle).await?;
            if let Some(result) =
                calc_battle_result(battle, combatant.controller, &self.config, prior)
            {
                user.experience += result.experience;
                user.money += result.money;
            }

            folded.push(user);
        }

        self.battles
            .settle_battle(read_version, battle, folded)
            .await?;
        tracing::info!(battle = %battle.id, "battle settled and removed");
        Ok(())
    }
}

/// Accumulated outcome of one resolution pass.
#[derive(Default)]
struct Resolution {
    changed: bool,
    notification: Option<String>,
    logs: Vec<(u32, String, Vec<AppliedEffect>)>,
}

impl Resolution {
    fn push(&mut self, round: u32, outcome: ActionOutcome) {
        self.logs.push((round, outcome.description, outcome.applied));
    }
}

/// Carries a user's current (regeneration-adjusted) pool levels into their
/// battle snapshot; maxima come from the template.
fn carry_pools(combatant: &mut Combatant, user: &UserProfile) {
    combatant.health = ResourceMeter::new(user.health.current(), combatant.health.max());
    combatant.chakra = ResourceMeter::new(user.chakra.current(), combatant.chakra.max());
    combatant.stamina = ResourceMeter::new(user.stamina.current(), combatant.stamina.max());
}

/// Consumes a turn without an action (AI pass or illegal AI choice).
fn consume_turn_as_pass(
    battle: &mut Battle,
    actor: UserId,
    now: DateTime<Utc>,
    resolution: &mut Resolution,
) {
    let round = battle.round;
    if let Some(combatant) = battle.combatant_mut(actor) {
        combatant.acted_round = round;
        combatant.updated_at = now;
        resolution.logs.push((
            round,
            format!("{} holds their ground", combatant.username),
            Vec::new(),
        ));
    }
    battle.updated_at = now;
    resolution.changed = true;
}

/// Produces the redacted copy of a battle that is safe to return to `viewer`.
///
/// Opposing combatants lose their private data: the append-only history
/// lists and the equipped loadout with its cooldown clocks. Pools, position,
/// and realized effects stay visible; both sides see those anyway. Redaction
/// only clears fields, so applying it twice equals applying it once.
pub fn mask_battle(battle: &Battle, viewer: UserId) -> Battle {
    let mut masked = battle.clone();
    for combatant in &mut masked.combatants {
        if combatant.controller == viewer {
            continue;
        }
        combatant.used_generals.clear();
        combatant.used_stats.clear();
        combatant.used_actions.clear();
        combatant.jutsus.clear();
        combatant.items.clear();
    }
    masked
}
