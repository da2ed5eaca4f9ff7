//! Runtime orchestration for the battle engine.
//!
//! This crate wires the pure `battle-core` rules into a service: repositories
//! guard the shared battle record with optimistic concurrency, the event
//! publisher fans battle updates out to spectators, the AI provider plays
//! un-manned combatants, and [`BattleController`] exposes the procedure-call
//! surface the web layer invokes.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the request/response types downstream clients use
//! - [`controller`] hosts the persistence/concurrency controller
//! - [`events`] provides the injected real-time publisher
//! - [`providers`] hosts the AI action provider
//! - [`repository`] defines store contracts plus in-memory implementations
//! - [`user`] models the durable user rows battles fold back into

pub mod api;
pub mod controller;
pub mod events;
pub mod providers;
pub mod repository;
pub mod user;

pub use api::{
    GetBattleResponse, InitiateOutcome, PerformActionResponse, Result, RuntimeError,
};
pub use controller::{BattleController, mask_battle};
pub use events::{BattleUpdateEvent, BroadcastPublisher, ChannelPublisher, battle_channel};
pub use providers::{AiActionProvider, GreedyAiProvider};
pub use repository::{
    BattleEntry, BattleRepository, EntryRepository, HistoryRepository, HistoryRow, MemoryStore,
    RepositoryError, UserRepository,
};
pub use user::{UserProfile, UserStatus};
