//! Deterministic battle logic shared across the runtime and offline tools.
//!
//! `battle-core` defines the canonical combat rules (grid geometry, effect
//! realization, action resolution, turn scheduling, result evaluation) and
//! exposes pure APIs over an in-memory [`state::Battle`] aggregate. Nothing
//! in this crate performs I/O, reads the clock, or owns randomness; the
//! runtime stamps times and passes a seeded RNG in, which keeps every
//! resolution replayable.
pub mod action;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod engine;
pub mod grid;
pub mod result;
pub mod state;
pub mod template;

pub use action::{
    ActionContext, ActionError, ActionKind, ActionOutcome, ActionProfile, AppliedEffect,
    AppliedTarget, AvailableAction, BattleAction, available_actions, perform_battle_action,
};
pub use catalog::{Bloodline, Item, Jutsu, ResourceCost};
pub use config::BattleConfig;
pub use effect::{
    Calculation, EffectKind, EffectTemplate, GroundEffect, StatAxis, TemplateTarget, UserEffect,
    apply_round_effects, realize, realize_ground,
};
pub use engine::{Alignment, ControlState, advance_round, align_battle, perform_forced_skip};
pub use grid::BattleGrid;
pub use result::{BattleResult, calc_battle_result, reward_scaling};
pub use state::{
    Battle, BattleId, BattleType, Combatant, CombatSchool, General, Generals, ItemSlot, JutsuSlot,
    PoolKind, Position, ResourceMeter, SchoolStats, UserId,
};
pub use template::CombatantTemplate;
