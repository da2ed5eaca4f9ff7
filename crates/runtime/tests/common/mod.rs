#![allow(dead_code)]

use std::sync::Arc;

use battle_core::{BattleConfig, Position, UserId};
use battle_content::ContentCatalog;
use chrono::{DateTime, TimeZone, Utc};
use runtime::{
    BattleController, BroadcastPublisher, GreedyAiProvider, MemoryStore, UserProfile,
};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<BroadcastPublisher>,
    pub controller: Arc<BattleController>,
    pub start: DateTime<Utc>,
}

pub fn harness() -> Harness {
    // Honor RUST_LOG when a test needs tracing output; idempotent across tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let store = Arc::new(MemoryStore::new());
    let publisher = Arc::new(BroadcastPublisher::new());
    let catalog = Arc::new(ContentCatalog::builtin().expect("builtin content must parse"));
    let controller = Arc::new(BattleController::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        publisher.clone(),
        Arc::new(GreedyAiProvider::new()),
        catalog,
        BattleConfig::default(),
        42,
    ));
    Harness {
        store,
        publisher,
        controller,
        start: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

/// Seeds an awake user standing at a world tile, with the given loadout.
pub fn seed_user(
    harness: &Harness,
    id: u64,
    name: &str,
    level: u32,
    location: Position,
    jutsu_ids: &[&str],
) -> UserId {
    let mut user = UserProfile::new(UserId(id), name, level, harness.start);
    user.location = location;
    user.jutsu_ids = jutsu_ids.iter().map(|s| s.to_string()).collect();
    harness.store.seed_user(user);
    UserId(id)
}
